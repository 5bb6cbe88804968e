use crate::model::{LpModel, ModelError, Sense};
use crate::solution::Solution;
use crate::solver::LpSolver;

/// Enumerates the extreme points of a 2D polytope `{x : Ax <= b, x >= 0}`.
///
/// Every unordered pair of constraint boundaries (the m explicit rows plus
/// the two non-negativity bounds) is intersected; an intersection point is a
/// vertex iff it satisfies every half-plane in the set. Parallel boundary
/// pairs have no unique intersection and are skipped.
///
/// For an unbounded region this yields the finite set of feasible boundary
/// intersections, which is an incomplete description of the region; the
/// method is intended for bounded polytopes.
#[derive(Debug, Clone)]
pub struct VertexEnumerator {
    /// Absolute tolerance for singularity tests, the feasibility check, and
    /// coincident-vertex deduplication
    tolerance: f64,
}

impl Default for VertexEnumerator {
    fn default() -> Self {
        Self { tolerance: 1e-9 }
    }
}

/// The result of a vertex enumeration.
#[derive(Debug, Clone)]
pub struct VertexEnumeration {
    /// Feasible boundary intersections, deduplicated, in no particular order
    pub vertices: Vec<[f64; 2]>,
    /// The delegated solve of `max c'x` over the same region
    pub optimum: Solution,
}

impl VertexEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enumerates the vertices of `{x : Ax <= b, x >= 0}` and locates the
    /// maximizer of `c'x` over the same region.
    ///
    /// The maximizer is obtained by delegating the full LP to `solver`, not
    /// by scanning the enumerated vertices, so it stays correct even when
    /// the feasibility tolerance misclassifies a boundary point. Enumeration
    /// itself is purely geometric and never contacts the solver. The
    /// delegated [`Solution`] is returned whole, so an empty or unbounded
    /// region propagates as a status rather than an error.
    pub fn enumerate<S>(
        &self,
        a: &[Vec<f64>],
        b: &[f64],
        c: &[f64],
        solver: &S,
    ) -> Result<VertexEnumeration, ModelError>
    where
        S: LpSolver + ?Sized,
    {
        let model = LpModel::new(a.to_vec(), b.to_vec(), c.to_vec(), Sense::Maximize)?;
        if model.num_variables() != 2 {
            return Err(ModelError::NotPlanar(model.num_variables()));
        }

        // Full half-plane set: the m explicit rows plus -x1 <= 0 and -x2 <= 0.
        let mut rows: Vec<[f64; 2]> = a.iter().map(|row| [row[0], row[1]]).collect();
        let mut rhs = b.to_vec();
        rows.push([-1.0, 0.0]);
        rhs.push(0.0);
        rows.push([0.0, -1.0]);
        rhs.push(0.0);

        let mut vertices: Vec<[f64; 2]> = Vec::new();
        for i in 0..rows.len() {
            for j in i + 1..rows.len() {
                let Some(point) = self.intersect(rows[i], rhs[i], rows[j], rhs[j]) else {
                    continue;
                };
                if self.feasible(point, &rows, &rhs) && !self.seen(&vertices, point) {
                    vertices.push(point);
                }
            }
        }

        let optimum = solver.solve(&model);
        Ok(VertexEnumeration { vertices, optimum })
    }

    /// Solves the 2x2 system of the two boundaries taken as equalities.
    /// `None` when the boundaries are parallel.
    fn intersect(&self, r: [f64; 2], rb: f64, s: [f64; 2], sb: f64) -> Option<[f64; 2]> {
        let det = r[0] * s[1] - r[1] * s[0];
        if det.abs() <= self.tolerance {
            return None;
        }
        Some([
            (rb * s[1] - r[1] * sb) / det,
            (r[0] * sb - rb * s[0]) / det,
        ])
    }

    /// Whether `point` lies in the closed polytope, non-negativity included.
    fn feasible(&self, point: [f64; 2], rows: &[[f64; 2]], rhs: &[f64]) -> bool {
        rows.iter()
            .zip(rhs)
            .all(|(row, &limit)| row[0] * point[0] + row[1] * point[1] <= limit + self.tolerance)
    }

    fn seen(&self, vertices: &[[f64; 2]], point: [f64; 2]) -> bool {
        vertices.iter().any(|v| {
            (v[0] - point[0]).abs() <= self.tolerance && (v[1] - point[1]).abs() <= self.tolerance
        })
    }
}

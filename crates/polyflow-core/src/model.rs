use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::solution::SolveStatus;

/// Errors raised while assembling or reading back a model.
///
/// All of these are detected at the entry-point boundary, before any solver
/// is contacted. Outcomes of solving (infeasible, unbounded) are not errors;
/// they travel on [`crate::Solution`] as statuses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Constraint matrix has {rows} rows but rhs vector has length {rhs}")]
    RhsLength { rows: usize, rhs: usize },
    #[error("Constraint row {row} has {found} coefficients, objective has {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Objective must have at least one coefficient")]
    EmptyObjective,
    #[error("Vertex enumeration requires exactly 2 variables, found {0}")]
    NotPlanar(usize),
    #[error("Node supplies sum to {0}, expected 0")]
    SupplyImbalance(f64),
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),
    #[error("Arc {from} -> {to} has negative capacity {capacity}")]
    NegativeCapacity {
        from: String,
        to: String,
        capacity: f64,
    },
    #[error("Cannot interpret a solution with status {0:?}")]
    NotOptimal(SolveStatus),
    #[error("Solution has {found} values, expected one per arc ({expected})")]
    SolutionWidth { expected: usize, found: usize },
}

/// Whether the objective is maximized or minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sense {
    Maximize,
    Minimize,
}

/// A linear program in the canonical form
///
/// ```text
/// max/min  c'x
/// s.t.     Ax <= b
///          x >= 0
/// ```
///
/// The non-negativity bounds are implicit and always present. A model is
/// immutable once built; every consumer (solver backends, the vertex
/// enumerator, the flow translator) shares this one representation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LpModel {
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
    c: Vec<f64>,
    sense: Sense,
}

impl LpModel {
    /// Assembles a model from raw coefficient arrays, validating shapes.
    ///
    /// `a` is the row-major m×n constraint matrix, `b` the length-m right-hand
    /// side, `c` the length-n objective. A model with zero constraint rows is
    /// legal (only the non-negativity bounds apply); a model with zero
    /// variables is not.
    pub fn new(
        a: Vec<Vec<f64>>,
        b: Vec<f64>,
        c: Vec<f64>,
        sense: Sense,
    ) -> Result<Self, ModelError> {
        if c.is_empty() {
            return Err(ModelError::EmptyObjective);
        }
        if a.len() != b.len() {
            return Err(ModelError::RhsLength {
                rows: a.len(),
                rhs: b.len(),
            });
        }
        for (row, coeffs) in a.iter().enumerate() {
            if coeffs.len() != c.len() {
                return Err(ModelError::RowWidth {
                    row,
                    found: coeffs.len(),
                    expected: c.len(),
                });
            }
        }
        Ok(Self { a, b, c, sense })
    }

    /// The constraint matrix, row-major.
    pub fn a(&self) -> &[Vec<f64>] {
        &self.a
    }

    /// The constraint right-hand sides.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// The objective coefficients.
    pub fn c(&self) -> &[f64] {
        &self.c
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn num_constraints(&self) -> usize {
        self.a.len()
    }

    pub fn num_variables(&self) -> usize {
        self.c.len()
    }

    /// Iterates over constraint rows as `(coefficients, rhs)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&[f64], f64)> {
        self.a
            .iter()
            .map(Vec::as_slice)
            .zip(self.b.iter().copied())
    }
}

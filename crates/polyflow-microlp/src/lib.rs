use microlp::{ComparisonOp, OptimizationDirection, Problem};
use polyflow_core::{LpModel, LpSolver, Sense, Solution};

/// [`LpSolver`] backend over the pure-Rust `microlp` simplex.
///
/// Every canonical model maps directly: one bounded variable per objective
/// coefficient, one `<=` constraint per row. Solver failures come back as
/// [`Solution`] statuses, never panics.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl LpSolver for MicrolpSolver {
    fn solve(&self, model: &LpModel) -> Solution {
        let direction = match model.sense() {
            Sense::Maximize => OptimizationDirection::Maximize,
            Sense::Minimize => OptimizationDirection::Minimize,
        };

        let mut problem = Problem::new(direction);
        let vars: Vec<_> = model
            .c()
            .iter()
            .map(|&cost| problem.add_var(cost, (0.0, f64::INFINITY)))
            .collect();
        for (row, rhs) in model.rows() {
            let terms: Vec<_> = vars.iter().copied().zip(row.iter().copied()).collect();
            problem.add_constraint(terms, ComparisonOp::Le, rhs);
        }

        match problem.solve() {
            Ok(solved) => {
                let values = vars.iter().map(|&v| solved[v]).collect();
                Solution::optimal(values, solved.objective())
            }
            Err(microlp::Error::Infeasible) => Solution::infeasible(),
            Err(microlp::Error::Unbounded) => Solution::unbounded(),
            Err(err) => Solution::error(err.to_string()),
        }
    }
}

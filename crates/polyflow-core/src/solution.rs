#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The outcome of handing a model to a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolveStatus {
    /// An optimal solution was found
    Optimal,
    /// The feasible region is empty
    Infeasible,
    /// The objective is unbounded in the feasible direction
    Unbounded,
    /// The solver itself failed (numerical breakdown, licensing, ...)
    Error,
}

/// The result of solving a linear program.
///
/// A non-`Optimal` status is a normal outcome to report, not a crash:
/// callers inspect `status` before reading `values`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// Solution status
    pub status: SolveStatus,
    /// Values for each variable at the optimum; empty unless optimal
    pub values: Vec<f64>,
    /// Objective value at the optimum, reported in the model's own sense
    pub objective: f64,
    /// Solver diagnostic, populated when the status is `Error`
    pub message: Option<String>,
}

impl Solution {
    pub fn optimal(values: Vec<f64>, objective: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values,
            objective,
            message: None,
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            values: Vec::new(),
            objective: f64::INFINITY,
            message: None,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            status: SolveStatus::Unbounded,
            values: Vec::new(),
            objective: f64::NEG_INFINITY,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SolveStatus::Error,
            values: Vec::new(),
            objective: f64::NAN,
            message: Some(message.into()),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

use crate::model::LpModel;
use crate::solution::Solution;

/// The boundary to an external numeric LP solver.
///
/// Any backend that can maximize or minimize a linear objective over
/// `Ax <= b, x >= 0` and report a primal solution is interchangeable here.
/// Implementations must report failure through [`Solution::error`] rather
/// than panicking, and must report the objective in the model's own sense.
///
/// `solve` is the only operation in this crate that may block; it returns a
/// complete [`Solution`] or fails atomically, with no partial results.
pub trait LpSolver {
    fn solve(&self, model: &LpModel) -> Solution;
}

mod flow;
mod model;
mod solution;
mod solver;
mod vertex;

pub use flow::{Arc, FlowNetwork, FlowPlan};
pub use model::{LpModel, ModelError, Sense};
pub use solution::{SolveStatus, Solution};
pub use solver::LpSolver;
pub use vertex::{VertexEnumeration, VertexEnumerator};

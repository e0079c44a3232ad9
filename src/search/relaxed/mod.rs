//! Delete relaxation of a problem and the planning graph built over it.

mod planning_graph;
mod relaxed_problem;

pub use planning_graph::RelaxedPlanningGraph;
pub use relaxed_problem::{RelaxedAction, RelaxedProblem};

mod evaluation_manager;
mod rigid_relations;
mod state_labels;

pub use evaluation_manager::EvaluationManager;
pub(crate) use evaluation_manager::{numeric_lookup, resolve};
pub use rigid_relations::RigidRelations;
pub use state_labels::StateLabels;

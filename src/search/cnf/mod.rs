//! Canonical conjunctive normal form of conditions.

mod cnf_transformer;
mod conditions_cnf;
mod literal;
mod nnf;
mod renamer;

pub use cnf_transformer::CnfTransformer;
pub use conditions_cnf::ConditionsCnf;
pub use literal::{Clause, Literal, Proposition};
pub use nnf::{is_nnf, NnfTransformer};
pub use renamer::Rename;
pub(crate) use nnf::junction;

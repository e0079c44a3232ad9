mod atom;
pub mod cnf;
pub mod effects;
pub mod evaluation;
mod expression;
pub mod grounding;
pub mod heuristics;
mod ids;
mod negatable;
mod numeric_expression;
mod operator;
mod parameters;
mod plan;
mod primitives_factory;
mod problem;
mod problem_builder;
pub mod relaxed;
mod relative_state;
pub mod search_engines;
mod state;
mod states_enumerator;
mod substitution;
mod term;
mod type_hierarchy;
mod verbosity;

pub use atom::Atom;
pub use expression::{Comparison, Conditions, Expression};
pub use heuristics::{Heuristic, HeuristicValue};
pub use ids::{
    ConstantId, FunctionId, IdManager, IdManagers, PredicateId, Signature, TypeId, VariableId,
    VariableIdManager, OBJECT_TYPE_ID,
};
pub use negatable::Negatable;
pub use numeric_expression::{AssignOperator, NumericExpression};
pub use operator::{LiftedOperator, Operator, SubstitutionsGenerator};
pub use parameters::{Parameter, Parameters};
pub use plan::{Plan, PlanStep};
pub use primitives_factory::PrimitivesFactory;
pub use problem::{Predecessors, Problem, Successors};
pub use problem_builder::{ProblemBuilder, ProblemError, ProblemParts};
pub use relative_state::RelativeState;
pub use state::{FunctionValues, State};
pub use states_enumerator::{StatesEnumerator, StatesIterator};
pub use substitution::Substitution;
pub use term::Term;
pub use type_hierarchy::TypeHierarchy;
pub use verbosity::Verbosity;

//! Contains the abstract syntax tree of PDDL domain and problem files.

mod action_definition;
mod atom;
mod domain;
mod effect_definition;
mod fluent_expression;
mod function_definition;
mod goal_definition;
mod name;
mod objects;
mod predicate_definition;
mod problem;
mod requirement;
mod term;
mod r#type;
mod typed_list;
mod types;
mod variable;

pub use action_definition::ActionDefinition;
pub use atom::Atom;
pub use domain::Domain;
pub use effect_definition::EffectDefinition;
pub use fluent_expression::{AssignOperation, BinaryComparison, FluentExpression};
pub use function_definition::FunctionDefinition;
pub use goal_definition::GoalDefinition;
pub use name::Name;
pub use objects::Objects;
pub use predicate_definition::PredicateDefinition;
pub use problem::{InitElement, Metric, Optimization, Problem};
pub use r#type::{PrimitiveType, Type, TYPE_NUMBER, TYPE_OBJECT};
pub use requirement::{Requirement, Requirements};
pub use term::Term;
pub use typed_list::{ToTyped, Typed, TypedList, TypedNames, TypedVariables};
pub use types::Types;
pub use variable::Variable;

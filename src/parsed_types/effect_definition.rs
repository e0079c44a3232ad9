//! Contains effect definitions via the [`EffectDefinition`] type.

use crate::parsed_types::{AssignOperation, Atom, FluentExpression, GoalDefinition, Term};
use crate::parsed_types::TypedVariables;

#[derive(Debug, Clone, PartialEq)]
pub enum EffectDefinition {
    Add(Atom<Term>),
    Delete(Atom<Term>),
    /// Assignment to a numeric or object-valued function. Object-valued
    /// functions only support [`AssignOperation::Assign`] with a bare term.
    Assign(AssignOperation, Atom<Term>, FluentExpression),
    /// ## Requirements
    /// Requires [Conditional Effects](crate::parsed_types::Requirement::ConditionalEffects).
    When(GoalDefinition, Vec<EffectDefinition>),
    /// ## Requirements
    /// Requires [Conditional Effects](crate::parsed_types::Requirement::ConditionalEffects).
    ForAll(TypedVariables, Vec<EffectDefinition>),
}

impl EffectDefinition {
    pub const fn new_add(atom: Atom<Term>) -> Self {
        Self::Add(atom)
    }

    pub const fn new_delete(atom: Atom<Term>) -> Self {
        Self::Delete(atom)
    }

    pub const fn new_assign(
        operation: AssignOperation,
        function: Atom<Term>,
        value: FluentExpression,
    ) -> Self {
        Self::Assign(operation, function, value)
    }

    pub fn new_when(condition: GoalDefinition, effects: Vec<EffectDefinition>) -> Self {
        Self::When(condition, effects)
    }

    pub fn new_forall(variables: TypedVariables, effects: Vec<EffectDefinition>) -> Self {
        Self::ForAll(variables, effects)
    }
}

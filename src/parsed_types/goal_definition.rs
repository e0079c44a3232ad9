//! Contains goal descriptions via the [`GoalDefinition`] type. Goal
//! descriptions are used for action preconditions, conditions of conditional
//! effects and problem goals.

use crate::parsed_types::{Atom, BinaryComparison, FluentExpression, Term, TypedVariables};

#[derive(Debug, Clone, PartialEq)]
pub enum GoalDefinition {
    Atom(Atom<Term>),
    And(Vec<GoalDefinition>),
    /// ## Requirements
    /// Requires [Disjunctive Preconditions](crate::parsed_types::Requirement::DisjunctivePreconditions).
    Or(Vec<GoalDefinition>),
    /// ## Requirements
    /// Requires [Negative Preconditions](crate::parsed_types::Requirement::NegativePreconditions).
    Not(Box<GoalDefinition>),
    /// ## Requirements
    /// Requires [Disjunctive Preconditions](crate::parsed_types::Requirement::DisjunctivePreconditions).
    Imply(Box<GoalDefinition>, Box<GoalDefinition>),
    /// ## Requirements
    /// Requires [Existential Preconditions](crate::parsed_types::Requirement::ExistentialPreconditions).
    Exists(TypedVariables, Box<GoalDefinition>),
    /// ## Requirements
    /// Requires [Universal Preconditions](crate::parsed_types::Requirement::UniversalPreconditions).
    ForAll(TypedVariables, Box<GoalDefinition>),
    /// Either an equality between two object terms or a numeric comparison;
    /// which one is decided against the domain's function declarations.
    Compare(BinaryComparison, FluentExpression, FluentExpression),
}

impl GoalDefinition {
    #[inline(always)]
    pub const fn new_atom(value: Atom<Term>) -> Self {
        Self::Atom(value)
    }

    #[inline(always)]
    pub fn new_and<T: IntoIterator<Item = GoalDefinition>>(values: T) -> Self {
        Self::And(values.into_iter().collect())
    }

    #[inline(always)]
    pub fn new_or<T: IntoIterator<Item = GoalDefinition>>(values: T) -> Self {
        Self::Or(values.into_iter().collect())
    }

    #[inline(always)]
    pub fn new_not(value: GoalDefinition) -> Self {
        Self::Not(Box::new(value))
    }

    #[inline(always)]
    pub fn new_imply(a: GoalDefinition, b: GoalDefinition) -> Self {
        Self::Imply(Box::new(a), Box::new(b))
    }

    #[inline(always)]
    pub fn new_exists(variables: TypedVariables, value: GoalDefinition) -> Self {
        Self::Exists(variables, Box::new(value))
    }

    #[inline(always)]
    pub fn new_forall(variables: TypedVariables, value: GoalDefinition) -> Self {
        Self::ForAll(variables, Box::new(value))
    }

    #[inline(always)]
    pub const fn new_compare(
        comparison: BinaryComparison,
        a: FluentExpression,
        b: FluentExpression,
    ) -> Self {
        Self::Compare(comparison, a, b)
    }

    /// An empty conjunction, used for actions without preconditions.
    pub fn empty() -> Self {
        Self::And(vec![])
    }

    pub fn is_empty(&self) -> bool {
        match self {
            GoalDefinition::And(x) => x.iter().all(|y| y.is_empty()),
            _ => false,
        }
    }
}

//! Provides predicate definitions.

use crate::parsed_types::{Name, TypedVariables};

/// Definition for a single predicate.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PredicateDefinition {
    name: Name,
    variables: TypedVariables,
}

impl PredicateDefinition {
    pub const fn new(name: Name, variables: TypedVariables) -> Self {
        Self { name, variables }
    }

    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Gets a reference to the variables.
    pub fn variables(&self) -> &TypedVariables {
        &self.variables
    }

    pub fn arity(&self) -> usize {
        self.variables.len()
    }
}

impl From<(Name, TypedVariables)> for PredicateDefinition {
    fn from(value: (Name, TypedVariables)) -> Self {
        PredicateDefinition::new(value.0, value.1)
    }
}

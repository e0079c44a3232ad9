//! Provides function definitions.

use crate::parsed_types::{Name, Type, TypedVariables, TYPE_NUMBER};

/// Definition for a single function. Functions without a declared return type
/// are numeric.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FunctionDefinition {
    name: Name,
    variables: TypedVariables,
    return_type: Type,
}

impl FunctionDefinition {
    pub fn new(name: Name, variables: TypedVariables, return_type: Option<Type>) -> Self {
        Self {
            name,
            variables,
            return_type: return_type.unwrap_or_else(|| Type::from(TYPE_NUMBER)),
        }
    }

    pub const fn name(&self) -> &Name {
        &self.name
    }

    pub fn variables(&self) -> &TypedVariables {
        &self.variables
    }

    pub fn arity(&self) -> usize {
        self.variables.len()
    }

    pub const fn return_type(&self) -> &Type {
        &self.return_type
    }

    /// Whether the function maps to numbers rather than objects.
    pub fn is_numeric(&self) -> bool {
        self.return_type.is_number()
    }
}

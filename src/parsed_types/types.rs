//! Provides type definitions.

use crate::parsed_types::{Name, Type, Typed, TypedNames, TYPE_OBJECT};
use std::ops::Deref;

/// A set of type declarations, each naming its parent type(s).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Types(TypedNames);

impl Types {
    pub const fn new(types: TypedNames) -> Self {
        Self(types)
    }

    /// Gets the values.
    pub fn values(&self) -> &TypedNames {
        &self.0
    }
}

impl Default for Types {
    fn default() -> Self {
        Self::new(TypedNames::from_iter([Typed::new(
            Name::from(TYPE_OBJECT),
            Type::object(),
        )]))
    }
}

impl Deref for Types {
    type Target = TypedNames;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<TypedNames> for Types {
    fn from(value: TypedNames) -> Self {
        Types::new(value)
    }
}

//! Contains types.

use crate::parsed_types::Name;
use std::ops::Deref;

pub const TYPE_OBJECT: &str = "object";
pub const TYPE_NUMBER: &str = "number";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
pub struct PrimitiveType(Name);

impl PrimitiveType {
    pub fn new(name: Name) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &Name {
        &self.0
    }

    pub fn object() -> Self {
        Self(Name::new(TYPE_OBJECT))
    }

    pub fn is_number(&self) -> bool {
        self.0 == TYPE_NUMBER
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Type {
    Exactly(PrimitiveType),
    EitherOf(Vec<PrimitiveType>),
}

impl Type {
    pub fn object() -> Self {
        Type::Exactly(PrimitiveType::object())
    }

    pub fn len(&self) -> usize {
        match self {
            Type::Exactly(_) => 1,
            Type::EitherOf(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_primitive(&self) -> Option<&PrimitiveType> {
        match self {
            Type::Exactly(p) => Some(p),
            _ => None,
        }
    }

    pub fn primitives(&self) -> &[PrimitiveType] {
        match self {
            Type::Exactly(p) => std::slice::from_ref(p),
            Type::EitherOf(v) => v.as_slice(),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Type::Exactly(p) if p.is_number())
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::object()
    }
}

impl From<&str> for Type {
    fn from(value: &str) -> Self {
        Self::Exactly(value.into())
    }
}

impl From<Vec<&str>> for Type {
    fn from(value: Vec<&str>) -> Self {
        Self::EitherOf(value.iter().map(|&x| PrimitiveType::from(x)).collect())
    }
}

impl From<PrimitiveType> for Type {
    fn from(value: PrimitiveType) -> Self {
        Self::Exactly(value)
    }
}

impl From<Vec<PrimitiveType>> for Type {
    fn from(value: Vec<PrimitiveType>) -> Self {
        Self::EitherOf(value)
    }
}

impl<P> FromIterator<P> for Type
where
    P: Into<PrimitiveType>,
{
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Self::EitherOf(iter.into_iter().map(|x| x.into()).collect())
    }
}

impl<T> From<T> for PrimitiveType
where
    T: Into<Name>,
{
    #[inline(always)]
    fn from(value: T) -> Self {
        PrimitiveType::new(value.into())
    }
}

impl AsRef<str> for PrimitiveType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for PrimitiveType {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{Parser, Span};

    #[test]
    fn single_primitive() {
        let (_, t) = Type::parse(Span::new("object")).unwrap();
        assert_eq!(t.primitives().len(), 1);
        assert_eq!(t.get_primitive(), Some(&PrimitiveType::object()));
    }

    #[test]
    fn either_of_many() {
        let (_, t) = Type::parse(Span::new("(either truck plane)")).unwrap();
        assert_eq!(t.primitives().len(), 2);
        assert!(t.get_primitive().is_none());
    }
}

use crate::parsed_types::{Name, PrimitiveType, Type, Variable};
use std::ops::Deref;

/// A value together with its declared type, e.g. `?x - truck`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Typed<T>(T, Type);

impl<T> Typed<T> {
    pub const fn new(value: T, r#type: Type) -> Self {
        Self(value, r#type)
    }

    pub fn new_object(value: T) -> Self {
        Self(value, Type::object())
    }

    pub const fn value(&self) -> &T {
        &self.0
    }

    pub const fn type_(&self) -> &Type {
        &self.1
    }
}

/// Conversion of a value into a [`Typed`] value.
pub trait ToTyped<T> {
    fn to_typed<I: Into<Type>>(self, r#type: I) -> Typed<T>;

    fn to_typed_either<I: IntoIterator<Item = P>, P: Into<PrimitiveType>>(
        self,
        types: I,
    ) -> Typed<T>;
}

impl ToTyped<Name> for Name {
    fn to_typed<I: Into<Type>>(self, r#type: I) -> Typed<Name> {
        Typed::new(self, r#type.into())
    }

    fn to_typed_either<I: IntoIterator<Item = P>, P: Into<PrimitiveType>>(
        self,
        types: I,
    ) -> Typed<Name> {
        Typed::new(self, Type::from_iter(types))
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct TypedList<T>(Vec<Typed<T>>);

pub type TypedNames = TypedList<Name>;
pub type TypedVariables = TypedList<Variable>;

impl<T> TypedList<T> {
    pub const fn new(list: Vec<Typed<T>>) -> Self {
        Self(list)
    }

    pub fn value(&self) -> &[Typed<T>] {
        self.0.as_slice()
    }
}

impl<T> From<Vec<Typed<T>>> for TypedList<T> {
    fn from(iter: Vec<Typed<T>>) -> Self {
        TypedList::new(iter)
    }
}

impl<T> FromIterator<Typed<T>> for TypedList<T> {
    fn from_iter<I: IntoIterator<Item = Typed<T>>>(iter: I) -> Self {
        TypedList::new(iter.into_iter().collect())
    }
}

impl<T> Deref for TypedList<T> {
    type Target = [Typed<T>];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl<T> IntoIterator for TypedList<T> {
    type Item = Typed<T>;
    type IntoIter = std::vec::IntoIter<Typed<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

//! Contains atoms via the [`Atom`] type.

use crate::parsed_types::Name;
use std::ops::Deref;

/// A predicate or function symbol applied to a list of values. Whether the
/// symbol names a predicate or a function is only known once the domain's
/// symbol tables are built.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Atom<T> {
    name: Name,
    values: Vec<T>,
}

impl<T> Atom<T> {
    pub const fn new(name: Name, values: Vec<T>) -> Self {
        Self { name, values }
    }

    pub const fn name(&self) -> &Name {
        &self.name
    }

    pub fn values(&self) -> &[T] {
        self.values.as_slice()
    }
}

impl<T> From<(Name, Vec<T>)> for Atom<T> {
    fn from(value: (Name, Vec<T>)) -> Self {
        Atom::new(value.0, value.1)
    }
}

impl<T> Deref for Atom<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.values()
    }
}

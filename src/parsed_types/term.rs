use crate::parsed_types::{Atom, Name, Variable};

/// A term as it appears in the source text: an object name, a variable or an
/// (object-valued) function application such as `(location-of ?truck)`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Term {
    Name(Name),
    Variable(Variable),
    Function(Atom<Term>),
}

impl Term {
    pub const fn new_name(name: Name) -> Self {
        Self::Name(name)
    }

    pub const fn new_variable(var: Variable) -> Self {
        Self::Variable(var)
    }

    pub const fn new_function(atom: Atom<Term>) -> Self {
        Self::Function(atom)
    }
}

impl From<Name> for Term {
    fn from(value: Name) -> Self {
        Self::Name(value)
    }
}

impl From<Variable> for Term {
    fn from(value: Variable) -> Self {
        Self::Variable(value)
    }
}

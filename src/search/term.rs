use crate::search::{Atom, ConstantId, IdManagers, VariableId};
use std::collections::BTreeSet;

/// A term of a lifted or grounded atom. Object-function terms are headed by an
/// atom over the function symbols, so functions may nest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Constant(ConstantId),
    Variable(VariableId),
    ObjectFunction(Atom),
}

impl Term {
    #[inline(always)]
    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Constant(_))
    }

    #[inline(always)]
    pub fn as_constant(&self) -> Option<ConstantId> {
        match self {
            Term::Constant(constant) => Some(*constant),
            _ => None,
        }
    }

    /// Whether the term contains no variables. Grounded object-function terms
    /// still need a state to be resolved to a constant.
    pub fn is_grounded(&self) -> bool {
        match self {
            Term::Constant(_) => true,
            Term::Variable(_) => false,
            Term::ObjectFunction(atom) => atom.is_grounded(),
        }
    }

    pub fn collect_variables(&self, variables: &mut BTreeSet<VariableId>) {
        match self {
            Term::Constant(_) => {}
            Term::Variable(variable) => {
                variables.insert(*variable);
            }
            Term::ObjectFunction(atom) => atom.collect_variables(variables),
        }
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        match self {
            Term::Constant(constant) => symbols.constants.name(*constant).to_string(),
            Term::Variable(variable) => symbols.variable_name(*variable),
            Term::ObjectFunction(atom) => atom.human_readable_function(symbols),
        }
    }
}

impl From<ConstantId> for Term {
    fn from(value: ConstantId) -> Self {
        Term::Constant(value)
    }
}

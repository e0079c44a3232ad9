use crate::search::{ConstantId, IdManager, IdManagers, Term, VariableId};
use std::collections::BTreeSet;

/// A predicate or function symbol applied to terms. Which symbol table
/// `name_id` refers to is given by the context the atom is used in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom {
    pub name_id: usize,
    pub terms: Vec<Term>,
}

impl Atom {
    pub fn new(name_id: usize, terms: Vec<Term>) -> Self {
        Self { name_id, terms }
    }

    pub fn new_grounded(name_id: usize, constants: &[ConstantId]) -> Self {
        Self {
            name_id,
            terms: constants.iter().map(|&c| Term::Constant(c)).collect(),
        }
    }

    #[inline(always)]
    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// Whether the atom contains no variables, looking through nested
    /// object-function terms.
    pub fn is_grounded(&self) -> bool {
        self.terms.iter().all(|term| term.is_grounded())
    }

    /// Whether every term is a constant.
    pub fn is_fully_resolved(&self) -> bool {
        self.terms.iter().all(|term| term.is_constant())
    }

    /// The constants of a fully resolved atom, `None` at open positions.
    pub fn grounded_arguments(&self) -> Vec<Option<ConstantId>> {
        self.terms.iter().map(|term| term.as_constant()).collect()
    }

    pub fn collect_variables(&self, variables: &mut BTreeSet<VariableId>) {
        for term in &self.terms {
            term.collect_variables(variables);
        }
    }

    pub fn variables(&self) -> BTreeSet<VariableId> {
        let mut variables = BTreeSet::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn human_readable_with(&self, table: &IdManager, symbols: &IdManagers) -> String {
        let mut text = format!("({}", table.name(self.name_id));
        for term in &self.terms {
            text.push(' ');
            text.push_str(&term.human_readable(symbols));
        }
        text.push(')');
        text
    }

    pub fn human_readable_predicate(&self, symbols: &IdManagers) -> String {
        self.human_readable_with(&symbols.predicates, symbols)
    }

    pub fn human_readable_function(&self, symbols: &IdManagers) -> String {
        self.human_readable_with(&symbols.functions, symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groundedness_looks_through_functions() {
        let nested = Atom::new(
            0,
            vec![
                Term::Constant(1),
                Term::ObjectFunction(Atom::new(2, vec![Term::Variable(7)])),
            ],
        );
        assert!(!nested.is_grounded());
        assert_eq!(nested.variables(), BTreeSet::from([7]));
        assert_eq!(nested.grounded_arguments(), vec![Some(1), None]);

        let grounded = Atom::new(
            0,
            vec![Term::ObjectFunction(Atom::new_grounded(2, &[3]))],
        );
        assert!(grounded.is_grounded());
        assert!(!grounded.is_fully_resolved());
    }
}

use crate::search::{Atom, FunctionId, PredicateId};
use std::collections::BTreeSet;

/// Predicates that no effect ever changes, together with their true ground
/// atoms, and the functions no effect ever assigns. Computed once when the
/// problem is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RigidRelations {
    predicates: BTreeSet<PredicateId>,
    atoms: BTreeSet<Atom>,
    static_functions: BTreeSet<FunctionId>,
}

impl RigidRelations {
    pub fn new(
        predicates: BTreeSet<PredicateId>,
        atoms: BTreeSet<Atom>,
        static_functions: BTreeSet<FunctionId>,
    ) -> Self {
        debug_assert!(atoms.iter().all(|atom| predicates.contains(&atom.name_id)));
        Self {
            predicates,
            atoms,
            static_functions,
        }
    }

    #[inline(always)]
    pub fn is_rigid_predicate(&self, predicate: PredicateId) -> bool {
        self.predicates.contains(&predicate)
    }

    #[inline(always)]
    pub fn is_static_function(&self, function: FunctionId) -> bool {
        self.static_functions.contains(&function)
    }

    /// The truth of a fully resolved atom over a rigid predicate, `None` for
    /// every other atom.
    pub fn predicate_truth(&self, atom: &Atom) -> Option<bool> {
        if self.is_rigid_predicate(atom.name_id) && atom.is_fully_resolved() {
            Some(self.atoms.contains(atom))
        } else {
            None
        }
    }

    pub fn predicates(&self) -> &BTreeSet<PredicateId> {
        &self.predicates
    }

    pub fn atoms(&self) -> &BTreeSet<Atom> {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

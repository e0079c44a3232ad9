use crate::search::Atom;
use std::collections::HashMap;

/// Achievement cost of the ground atoms reached by a relaxed planning graph.
/// Atoms without a label were never reached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateLabels {
    labels: HashMap<Atom, f64>,
}

impl StateLabels {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn get(&self, atom: &Atom) -> Option<f64> {
        self.labels.get(atom).copied()
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.labels.contains_key(atom)
    }

    /// Labels the atom unless it already has a label. Returns whether the
    /// label was set.
    pub fn insert_if_absent(&mut self, atom: Atom, label: f64) -> bool {
        if self.labels.contains_key(&atom) {
            return false;
        }
        self.labels.insert(atom, label);
        true
    }

    /// Lowers the label of an already labelled atom.
    pub fn lower(&mut self, atom: &Atom, label: f64) {
        if let Some(existing) = self.labels.get_mut(atom) {
            if label < *existing {
                *existing = label;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Atom, f64)> {
        self.labels.iter().map(|(atom, &label)| (atom, label))
    }
}

use crate::search::{AssignOperator, Atom, ConstantId, IdManagers};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, BTreeSet};

/// Read access to function values, shared by complete and relative states so
/// that deep grounding and numeric evaluation work against either.
pub trait FunctionValues {
    fn numeric_value(&self, atom: &Atom) -> Option<f64>;

    fn object_value(&self, atom: &Atom) -> Option<ConstantId>;
}

/// A complete valuation: the predicates that hold, and the values of the
/// defined numeric and object functions. Functions missing from the maps are
/// undefined. All atoms are fully resolved.
///
/// States handed out by the problem are never mutated afterwards; the point
/// mutations are used on private working copies while applying effects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    predicates: BTreeSet<Atom>,
    numeric: BTreeMap<Atom, OrderedFloat<f64>>,
    objects: BTreeMap<Atom, ConstantId>,
}

impl State {
    pub fn new(
        predicates: BTreeSet<Atom>,
        numeric: BTreeMap<Atom, OrderedFloat<f64>>,
        objects: BTreeMap<Atom, ConstantId>,
    ) -> Self {
        debug_assert!(predicates.iter().all(|atom| atom.is_fully_resolved()));
        Self {
            predicates,
            numeric,
            objects,
        }
    }

    #[inline(always)]
    pub fn has_predicate(&self, atom: &Atom) -> bool {
        self.predicates.contains(atom)
    }

    pub fn predicates(&self) -> &BTreeSet<Atom> {
        &self.predicates
    }

    pub fn numeric_values(&self) -> impl Iterator<Item = (&Atom, f64)> {
        self.numeric.iter().map(|(atom, value)| (atom, value.0))
    }

    pub fn object_values(&self) -> impl Iterator<Item = (&Atom, ConstantId)> {
        self.objects.iter().map(|(atom, &value)| (atom, value))
    }

    pub fn add_predicate(&mut self, atom: Atom) {
        debug_assert!(atom.is_fully_resolved(), "adding an unresolved atom");
        self.predicates.insert(atom);
    }

    pub fn remove_predicate(&mut self, atom: &Atom) {
        self.predicates.remove(atom);
    }

    /// Applies a numeric assignment on top of the current value. An undefined
    /// result leaves the function undefined.
    pub fn assign_numeric(&mut self, operator: AssignOperator, atom: Atom, value: Option<f64>) {
        match operator.apply(self.numeric_value(&atom), value) {
            Some(result) => {
                self.numeric.insert(atom, OrderedFloat(result));
            }
            None => {
                self.numeric.remove(&atom);
            }
        }
    }

    pub fn assign_object(&mut self, atom: Atom, value: Option<ConstantId>) {
        match value {
            Some(constant) => {
                self.objects.insert(atom, constant);
            }
            None => {
                self.objects.remove(&atom);
            }
        }
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        let mut parts: Vec<String> = self
            .predicates
            .iter()
            .map(|atom| atom.human_readable_predicate(symbols))
            .collect();
        parts.extend(self.numeric.iter().map(|(atom, value)| {
            format!("(= {} {})", atom.human_readable_function(symbols), value)
        }));
        parts.extend(self.objects.iter().map(|(atom, &value)| {
            format!(
                "(= {} {})",
                atom.human_readable_function(symbols),
                symbols.constants.name(value)
            )
        }));
        parts.join(" ")
    }
}

impl FunctionValues for State {
    #[inline(always)]
    fn numeric_value(&self, atom: &Atom) -> Option<f64> {
        self.numeric.get(atom).map(|value| value.0)
    }

    #[inline(always)]
    fn object_value(&self, atom: &Atom) -> Option<ConstantId> {
        self.objects.get(atom).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_mutations() {
        let counter = Atom::new_grounded(0, &[1]);
        let mut state = State::default();
        state.assign_numeric(AssignOperator::Increase, counter.clone(), Some(1.0));
        assert_eq!(state.numeric_value(&counter), None);

        state.assign_numeric(AssignOperator::Assign, counter.clone(), Some(10.0));
        state.assign_numeric(AssignOperator::Increase, counter.clone(), Some(5.0));
        state.assign_numeric(AssignOperator::Decrease, counter.clone(), Some(3.0));
        assert_eq!(state.numeric_value(&counter), Some(12.0));

        let holding = Atom::new_grounded(2, &[0]);
        state.add_predicate(holding.clone());
        assert!(state.has_predicate(&holding));
        state.remove_predicate(&holding);
        assert!(!state.has_predicate(&holding));

        state.assign_object(Atom::new_grounded(1, &[0]), Some(4));
        assert_eq!(state.object_value(&Atom::new_grounded(1, &[0])), Some(4));
        state.assign_object(Atom::new_grounded(1, &[0]), None);
        assert_eq!(state.object_value(&Atom::new_grounded(1, &[0])), None);
    }

    #[test]
    fn equal_contents_are_equal_states() {
        let mut a = State::default();
        let mut b = State::default();
        a.add_predicate(Atom::new_grounded(0, &[1]));
        a.add_predicate(Atom::new_grounded(0, &[2]));
        b.add_predicate(Atom::new_grounded(0, &[2]));
        b.add_predicate(Atom::new_grounded(0, &[1]));
        assert_eq!(a, b);
    }
}

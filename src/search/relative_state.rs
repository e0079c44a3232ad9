use crate::search::{
    Atom, Comparison, ConstantId, Conditions, Expression, FunctionValues, IdManagers,
    NumericExpression, Parameters, State, Term,
};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, BTreeSet};

/// A partial, open-world valuation. Predicates are known to hold, known not
/// to hold, or unknown; functions are either fixed to a value or unknown. A
/// relative state stands for every state agreeing with what it fixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativeState {
    positive: BTreeSet<Atom>,
    negative: BTreeSet<Atom>,
    numeric: BTreeMap<Atom, OrderedFloat<f64>>,
    objects: BTreeMap<Atom, ConstantId>,
}

impl RelativeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positive(&self) -> &BTreeSet<Atom> {
        &self.positive
    }

    pub fn negative(&self) -> &BTreeSet<Atom> {
        &self.negative
    }

    pub fn numeric_values(&self) -> impl Iterator<Item = (&Atom, f64)> {
        self.numeric.iter().map(|(atom, value)| (atom, value.0))
    }

    pub fn object_values(&self) -> impl Iterator<Item = (&Atom, ConstantId)> {
        self.objects.iter().map(|(atom, &value)| (atom, value))
    }

    /// Whether the predicate is fixed either way.
    pub fn fixes_predicate(&self, atom: &Atom) -> bool {
        self.positive.contains(atom) || self.negative.contains(atom)
    }

    /// Fixes the truth of a predicate. Returns false, leaving the state
    /// untouched, if the opposite is already fixed.
    pub fn add_literal(&mut self, negated: bool, atom: Atom) -> bool {
        debug_assert!(atom.is_fully_resolved(), "relative states hold ground atoms");
        let (same, opposite) = if negated {
            (&mut self.negative, &self.positive)
        } else {
            (&mut self.positive, &self.negative)
        };
        if opposite.contains(&atom) {
            return false;
        }
        same.insert(atom);
        true
    }

    /// Fixes a numeric function. Returns false if it is already fixed to a
    /// different value.
    pub fn set_numeric(&mut self, atom: Atom, value: f64) -> bool {
        match self.numeric.get(&atom) {
            Some(existing) => existing.0 == value,
            None => {
                self.numeric.insert(atom, OrderedFloat(value));
                true
            }
        }
    }

    /// Fixes an object function. Returns false if it is already fixed to a
    /// different constant.
    pub fn set_object(&mut self, atom: Atom, value: ConstantId) -> bool {
        match self.objects.get(&atom) {
            Some(&existing) => existing == value,
            None => {
                self.objects.insert(atom, value);
                true
            }
        }
    }

    /// Whether the complete state is one of the states this relative state
    /// stands for.
    pub fn evaluate(&self, state: &State) -> bool {
        self.positive.iter().all(|atom| state.has_predicate(atom))
            && !self.negative.iter().any(|atom| state.has_predicate(atom))
            && self
                .numeric
                .iter()
                .all(|(atom, value)| state.numeric_value(atom) == Some(value.0))
            && self
                .objects
                .iter()
                .all(|(atom, &value)| state.object_value(atom) == Some(value))
    }

    /// Whether every state described by `other` is described by `self`, i.e.
    /// `self` fixes a subset of what `other` fixes.
    pub fn subsumes(&self, other: &RelativeState) -> bool {
        self.positive.is_subset(&other.positive)
            && self.negative.is_subset(&other.negative)
            && self
                .numeric
                .iter()
                .all(|(atom, value)| other.numeric.get(atom) == Some(value))
            && self
                .objects
                .iter()
                .all(|(atom, value)| other.objects.get(atom) == Some(value))
    }

    /// The conditions satisfied by exactly the states this relative state
    /// stands for.
    pub fn describing_conditions(&self) -> Conditions {
        let mut expressions: Vec<Expression> = self
            .positive
            .iter()
            .map(|atom| Expression::Predicate(atom.clone()))
            .collect();
        expressions.extend(
            self.negative
                .iter()
                .map(|atom| Expression::not(Expression::Predicate(atom.clone()))),
        );
        expressions.extend(self.numeric.iter().map(|(atom, value)| {
            Expression::NumericCompare(
                Comparison::Eq,
                NumericExpression::Function(atom.clone()),
                NumericExpression::Number(*value),
            )
        }));
        expressions.extend(self.objects.iter().map(|(atom, &value)| {
            Expression::Equals(Term::ObjectFunction(atom.clone()), Term::Constant(value))
        }));
        Conditions::new(Parameters::empty(), expressions)
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        self.describing_conditions()
            .to_expression()
            .human_readable(symbols)
    }
}

impl FunctionValues for RelativeState {
    fn numeric_value(&self, atom: &Atom) -> Option<f64> {
        self.numeric.get(atom).map(|value| value.0)
    }

    fn object_value(&self, atom: &Atom) -> Option<ConstantId> {
        self.objects.get(atom).copied()
    }
}

impl From<&State> for RelativeState {
    /// The relative state fixing exactly what the state fixes. Predicates
    /// the state does not hold are left unknown.
    fn from(state: &State) -> Self {
        Self {
            positive: state.predicates().clone(),
            negative: BTreeSet::new(),
            numeric: state
                .numeric_values()
                .map(|(atom, value)| (atom.clone(), OrderedFloat(value)))
                .collect(),
            objects: state
                .object_values()
                .map(|(atom, value)| (atom.clone(), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contradictory_literals_are_rejected() {
        let atom = Atom::new_grounded(0, &[1]);
        let mut relative = RelativeState::new();
        assert!(relative.add_literal(false, atom.clone()));
        assert!(!relative.add_literal(true, atom.clone()));
        assert!(relative.negative().is_empty());
        assert!(relative.set_numeric(Atom::new_grounded(1, &[]), 2.0));
        assert!(relative.set_numeric(Atom::new_grounded(1, &[]), 2.0));
        assert!(!relative.set_numeric(Atom::new_grounded(1, &[]), 3.0));
    }

    #[test]
    fn evaluation_and_subsumption() {
        let p = Atom::new_grounded(0, &[1]);
        let q = Atom::new_grounded(0, &[2]);
        let mut general = RelativeState::new();
        general.add_literal(false, p.clone());
        let mut specific = general.clone();
        specific.add_literal(true, q.clone());
        specific.set_object(Atom::new_grounded(3, &[]), 2);

        assert!(general.subsumes(&specific));
        assert!(!specific.subsumes(&general));

        let mut state = State::default();
        state.add_predicate(p.clone());
        state.assign_object(Atom::new_grounded(3, &[]), Some(2));
        assert!(general.evaluate(&state));
        assert!(specific.evaluate(&state));

        state.add_predicate(q);
        assert!(!specific.evaluate(&state));
        assert!(general.evaluate(&state));
    }

    #[test]
    fn describing_conditions_lists_every_fixed_value() {
        let mut relative = RelativeState::new();
        relative.add_literal(false, Atom::new_grounded(0, &[1]));
        relative.add_literal(true, Atom::new_grounded(0, &[2]));
        relative.set_numeric(Atom::new_grounded(1, &[]), 4.0);
        relative.set_object(Atom::new_grounded(2, &[0]), 1);
        let conditions = relative.describing_conditions();
        assert!(conditions.parameters.is_empty());
        assert_eq!(conditions.expressions.len(), 4);
    }
}

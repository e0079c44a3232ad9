use crate::search::cnf::{ConditionsCnf, Literal, Proposition};
use crate::search::evaluation::RigidRelations;
use crate::search::grounding::{Ground, GroundDeep};
use crate::search::{
    Atom, Comparison, ConstantId, FunctionValues, IdManagers, NumericExpression, RelativeState,
    State, Substitution, Term, TypeHierarchy, TypeId,
};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use tracing::debug;

/// Expands relative states and conditions into the complete states they
/// describe.
///
/// Rigid predicates and static functions take their values from the initial
/// state. Every other predicate a relative state leaves open is enumerated
/// both ways and every open object function over all admissible constants.
/// Open numeric functions have no finite domain and stay undefined.
#[derive(Debug, Clone)]
pub struct StatesEnumerator {
    symbols: Rc<IdManagers>,
    hierarchy: Rc<TypeHierarchy>,
    rigid: Rc<RigidRelations>,
    initial_state: Rc<State>,
}

impl StatesEnumerator {
    pub fn new(
        symbols: Rc<IdManagers>,
        hierarchy: Rc<TypeHierarchy>,
        rigid: Rc<RigidRelations>,
        initial_state: Rc<State>,
    ) -> Self {
        Self {
            symbols,
            hierarchy,
            rigid,
            initial_state,
        }
    }

    /// Every ground atom of the predicates some effect may change.
    pub fn fluent_atoms(&self) -> Vec<Atom> {
        self.symbols
            .predicate_signatures
            .iter()
            .enumerate()
            .filter(|(predicate, _)| !self.rigid.is_rigid_predicate(*predicate))
            .flat_map(|(predicate, signature)| self.ground_atoms(predicate, &signature.arguments))
            .collect()
    }

    /// Every ground atom of the symbol over admissible constants.
    pub fn ground_atoms(&self, name_id: usize, arguments: &[Vec<TypeId>]) -> Vec<Atom> {
        if arguments.is_empty() {
            return vec![Atom::new(name_id, vec![])];
        }
        arguments
            .iter()
            .map(|types| self.hierarchy.constants_of_types(types))
            .multi_cartesian_product()
            .map(|constants| Atom::new_grounded(name_id, &constants))
            .collect()
    }

    /// The constants an object function may take.
    pub fn admissible_values(&self, function: &Atom) -> Vec<ConstantId> {
        let return_types = self.symbols.function_signatures[function.name_id]
            .return_types
            .as_deref()
            .unwrap_or_default();
        self.hierarchy.constants_of_types(return_types)
    }

    /// The complete states agreeing with `relative`, lazily. Nothing is
    /// generated when `relative` contradicts a rigid predicate or a static
    /// function.
    pub fn enumerate_states(&self, relative: &RelativeState) -> StatesIterator {
        let mut predicates: BTreeSet<Atom> = self.rigid.atoms().clone();
        let mut numeric: BTreeMap<Atom, OrderedFloat<f64>> = BTreeMap::new();
        let mut objects: BTreeMap<Atom, ConstantId> = BTreeMap::new();

        let rigid_conflict = relative
            .positive()
            .iter()
            .any(|atom| self.rigid.predicate_truth(atom) == Some(false))
            || relative
                .negative()
                .iter()
                .any(|atom| self.rigid.predicate_truth(atom) == Some(true));
        if rigid_conflict {
            return StatesIterator::empty();
        }
        predicates.extend(relative.positive().iter().cloned());

        for (atom, value) in self.initial_state.numeric_values() {
            if self.rigid.is_static_function(atom.name_id) {
                numeric.insert(atom.clone(), OrderedFloat(value));
            }
        }
        for (atom, value) in self.initial_state.object_values() {
            if self.rigid.is_static_function(atom.name_id) {
                objects.insert(atom.clone(), value);
            }
        }
        for (atom, value) in relative.numeric_values() {
            if let Some(existing) = numeric.insert(atom.clone(), OrderedFloat(value)) {
                if existing.0 != value {
                    return StatesIterator::empty();
                }
            }
        }
        for (atom, value) in relative.object_values() {
            if let Some(existing) = objects.insert(atom.clone(), value) {
                if existing != value {
                    return StatesIterator::empty();
                }
            }
        }

        let open_atoms: Vec<Atom> = self
            .fluent_atoms()
            .into_iter()
            .filter(|atom| !relative.fixes_predicate(atom))
            .collect();

        let mut open_objects = vec![];
        for (function, signature) in self.symbols.function_signatures.iter().enumerate() {
            if signature.return_types.is_none() || self.rigid.is_static_function(function) {
                continue;
            }
            for atom in self.ground_atoms(function, &signature.arguments) {
                if relative.object_value(&atom).is_none() {
                    let values = self.admissible_values(&atom);
                    open_objects.push((atom, values));
                }
            }
        }

        StatesIterator::new(predicates, numeric, objects, open_atoms, open_objects)
    }

    /// The distinct complete states satisfying the conditions.
    pub fn enumerate_states_from_conditions(&self, cnf: &ConditionsCnf) -> Vec<State> {
        self.enumerate_relative_states(cnf)
            .iter()
            .flat_map(|relative| self.enumerate_states(relative))
            .unique()
            .collect()
    }

    /// Relative states whose union is the set of states satisfying the
    /// conditions, as far as it is representable.
    ///
    /// The parameters are grounded in every admissible way and the clauses
    /// expanded into disjunctive normal form. A literal mentioning an object
    /// function with an open value splits its branch over the admissible
    /// values of the function. Branches that are inconsistent, or that need a
    /// literal no relative state can express (a comparison between two
    /// unknown numeric functions, say), are skipped. Results described by a
    /// more general result are dropped.
    pub fn enumerate_relative_states(&self, cnf: &ConditionsCnf) -> Vec<RelativeState> {
        let mut results = BTreeSet::new();
        for binding in self.hierarchy.bindings(cnf.parameters()) {
            let substitution: Substitution = binding.into_iter().collect();
            let mut branches = BTreeSet::from([RelativeState::new()]);
            for clause in cnf.clauses() {
                let mut next = BTreeSet::new();
                for branch in &branches {
                    for literal in clause.iter() {
                        next.extend(self.extend(branch, literal, &substitution));
                    }
                }
                branches = next;
                if branches.is_empty() {
                    break;
                }
            }
            results.extend(branches);
        }

        let results: Vec<RelativeState> = results.into_iter().collect();
        let minimal: Vec<RelativeState> = results
            .iter()
            .filter(|candidate| {
                !results
                    .iter()
                    .any(|other| other != *candidate && other.subsumes(candidate))
            })
            .cloned()
            .collect();
        debug!(
            generated = results.len(),
            kept = minimal.len(),
            "enumerated relative states"
        );
        minimal
    }

    /// The ways of adding the literal to a branch.
    fn extend(
        &self,
        branch: &RelativeState,
        literal: &Literal,
        substitution: &Substitution,
    ) -> Vec<RelativeState> {
        let negated = literal.is_negated();
        let known = KnownValues {
            relative: branch,
            initial_state: &self.initial_state,
            rigid: &self.rigid,
        };
        let proposition = literal
            .underlying()
            .ground(substitution)
            .ground_deep(&Substitution::new(), &known);
        let keep_if = |holds: bool| {
            if holds != negated {
                vec![branch.clone()]
            } else {
                vec![]
            }
        };

        let direct_equality = matches!(
            &proposition,
            Proposition::Equals(Term::ObjectFunction(function), Term::Constant(_))
                | Proposition::Equals(Term::Constant(_), Term::ObjectFunction(function))
                if function.is_fully_resolved()
        );
        if !direct_equality {
            if let Some(function) = self.open_object_function(&proposition) {
                return self
                    .admissible_values(&function)
                    .into_iter()
                    .filter_map(|value| {
                        let mut next = branch.clone();
                        next.set_object(function.clone(), value).then_some(next)
                    })
                    .flat_map(|next| self.extend(&next, literal, substitution))
                    .collect();
            }
        }

        match proposition {
            Proposition::Predicate(atom) => {
                // a term left unresolved has no value, which makes the atom false
                if !atom.is_fully_resolved() {
                    return keep_if(false);
                }
                if let Some(truth) = self.rigid.predicate_truth(&atom) {
                    return keep_if(truth);
                }
                let mut next = branch.clone();
                if next.add_literal(negated, atom) {
                    vec![next]
                } else {
                    vec![]
                }
            }
            Proposition::Equals(Term::Constant(a), Term::Constant(b)) => keep_if(a == b),
            Proposition::Equals(Term::ObjectFunction(function), Term::Constant(constant))
            | Proposition::Equals(Term::Constant(constant), Term::ObjectFunction(function))
                if function.is_fully_resolved() =>
            {
                if self.rigid.is_static_function(function.name_id) {
                    return keep_if(self.initial_state.object_value(&function) == Some(constant));
                }
                let values = if negated {
                    self.admissible_values(&function)
                        .into_iter()
                        .filter(|&value| value != constant)
                        .collect()
                } else {
                    vec![constant]
                };
                values
                    .into_iter()
                    .filter_map(|value| {
                        let mut next = branch.clone();
                        next.set_object(function.clone(), value).then_some(next)
                    })
                    .collect()
            }
            Proposition::Equals(..) => keep_if(false),
            Proposition::NumericCompare(comparison, a, b) => {
                let lookup = |atom: &Atom| known.numeric_value(atom);
                match (a.evaluate(&lookup), b.evaluate(&lookup)) {
                    (Some(x), Some(y)) => keep_if(comparison.holds(x, y)),
                    (None, Some(value)) if comparison == Comparison::Eq && !negated => {
                        self.fix_numeric(branch, &a, value, &known)
                    }
                    (Some(value), None) if comparison == Comparison::Eq && !negated => {
                        self.fix_numeric(branch, &b, value, &known)
                    }
                    _ => vec![],
                }
            }
        }
    }

    /// The innermost object function of the proposition whose arguments are
    /// constants but whose value is still open, if any.
    fn open_object_function(&self, proposition: &Proposition) -> Option<Atom> {
        match proposition {
            Proposition::Predicate(atom) => self.open_in_atom(atom),
            Proposition::Equals(a, b) => self.open_in_term(a).or_else(|| self.open_in_term(b)),
            Proposition::NumericCompare(_, a, b) => a
                .functions()
                .into_iter()
                .chain(b.functions())
                .find_map(|atom| self.open_in_atom(atom)),
        }
    }

    fn open_in_atom(&self, atom: &Atom) -> Option<Atom> {
        atom.terms.iter().find_map(|term| self.open_in_term(term))
    }

    fn open_in_term(&self, term: &Term) -> Option<Atom> {
        let Term::ObjectFunction(function) = term else {
            return None;
        };
        self.open_in_atom(function).or_else(|| {
            (function.is_fully_resolved() && !self.rigid.is_static_function(function.name_id))
                .then(|| function.clone())
        })
    }

    fn fix_numeric(
        &self,
        branch: &RelativeState,
        expression: &NumericExpression,
        value: f64,
        known: &KnownValues,
    ) -> Vec<RelativeState> {
        let Some((function, solution)) = solve_for_function(expression, value, known) else {
            return vec![];
        };
        if self.rigid.is_static_function(function.name_id) {
            return vec![];
        }
        let mut next = branch.clone();
        if next.set_numeric(function, solution) {
            vec![next]
        } else {
            vec![]
        }
    }
}

/// Function values fixed by a relative state, or by the initial state for
/// static functions.
struct KnownValues<'a> {
    relative: &'a RelativeState,
    initial_state: &'a State,
    rigid: &'a RigidRelations,
}

impl FunctionValues for KnownValues<'_> {
    fn numeric_value(&self, atom: &Atom) -> Option<f64> {
        self.relative.numeric_value(atom).or_else(|| {
            self.rigid
                .is_static_function(atom.name_id)
                .then(|| self.initial_state.numeric_value(atom))
                .flatten()
        })
    }

    fn object_value(&self, atom: &Atom) -> Option<ConstantId> {
        self.relative.object_value(atom).or_else(|| {
            self.rigid
                .is_static_function(atom.name_id)
                .then(|| self.initial_state.object_value(atom))
                .flatten()
        })
    }
}

/// The function and its value making `expression` equal `target`, when the
/// expression is linear in a single unknown function.
fn solve_for_function(
    expression: &NumericExpression,
    target: f64,
    known: &KnownValues,
) -> Option<(Atom, f64)> {
    let lookup = |atom: &Atom| known.numeric_value(atom);
    let value_of = |e: &NumericExpression| e.evaluate(&lookup);
    match expression {
        NumericExpression::Function(atom) => {
            atom.is_fully_resolved().then(|| (atom.clone(), target))
        }
        NumericExpression::Plus(values) | NumericExpression::Multiply(values) => {
            let is_sum = matches!(expression, NumericExpression::Plus(_));
            let (unknown, rest): (Vec<&NumericExpression>, Vec<&NumericExpression>) =
                values.iter().partition(|v| value_of(v).is_none());
            let [unknown] = unknown.as_slice() else {
                return None;
            };
            let rest: Vec<f64> = rest.into_iter().filter_map(value_of).collect();
            if is_sum {
                solve_for_function(unknown, target - rest.iter().sum::<f64>(), known)
            } else {
                let product: f64 = rest.iter().product();
                if product == 0.0 {
                    return None;
                }
                solve_for_function(unknown, target / product, known)
            }
        }
        NumericExpression::Minus(a, b) => match (value_of(a), value_of(b)) {
            (None, Some(y)) => solve_for_function(a, target + y, known),
            (Some(x), None) => solve_for_function(b, x - target, known),
            _ => None,
        },
        NumericExpression::Divide(a, b) => match value_of(b) {
            Some(y) if y != 0.0 => solve_for_function(a, target * y, known),
            _ => None,
        },
        NumericExpression::UnaryMinus(a) => solve_for_function(a, -target, known),
        NumericExpression::Number(_) => None,
    }
}

/// Lazy enumeration of the states agreeing with a relative state, as a
/// mixed-radix counter: one binary digit per open predicate and one digit per
/// open object function. Object functions are the low digits.
#[derive(Debug, Clone)]
pub struct StatesIterator {
    predicates: BTreeSet<Atom>,
    numeric: BTreeMap<Atom, OrderedFloat<f64>>,
    objects: BTreeMap<Atom, ConstantId>,
    open_atoms: Vec<Atom>,
    open_objects: Vec<(Atom, Vec<ConstantId>)>,
    atom_digits: Vec<bool>,
    object_digits: Vec<usize>,
    generated: usize,
    exhausted: bool,
}

impl StatesIterator {
    fn new(
        predicates: BTreeSet<Atom>,
        numeric: BTreeMap<Atom, OrderedFloat<f64>>,
        objects: BTreeMap<Atom, ConstantId>,
        open_atoms: Vec<Atom>,
        open_objects: Vec<(Atom, Vec<ConstantId>)>,
    ) -> Self {
        // an object function without admissible values leaves no state
        let exhausted = open_objects.iter().any(|(_, values)| values.is_empty());
        Self {
            predicates,
            numeric,
            objects,
            atom_digits: vec![false; open_atoms.len()],
            object_digits: vec![0; open_objects.len()],
            open_atoms,
            open_objects,
            generated: 0,
            exhausted,
        }
    }

    fn empty() -> Self {
        Self {
            predicates: BTreeSet::new(),
            numeric: BTreeMap::new(),
            objects: BTreeMap::new(),
            open_atoms: vec![],
            open_objects: vec![],
            atom_digits: vec![],
            object_digits: vec![],
            generated: 0,
            exhausted: true,
        }
    }

    /// Number of states generated in total, `None` when it does not fit in a
    /// `usize`.
    pub fn total(&self) -> Option<usize> {
        if self.exhausted && self.generated == 0 {
            return Some(0);
        }
        if self.open_atoms.len() >= usize::BITS as usize {
            return None;
        }
        let mut total = 1usize << self.open_atoms.len();
        for (_, values) in &self.open_objects {
            total = total.checked_mul(values.len())?;
        }
        Some(total)
    }

    /// Moves to the next digit combination, marking the iterator exhausted
    /// once every combination was visited.
    fn advance(&mut self) {
        for (digit, (_, values)) in self.object_digits.iter_mut().zip(&self.open_objects) {
            *digit += 1;
            if *digit < values.len() {
                return;
            }
            *digit = 0;
        }
        for digit in self.atom_digits.iter_mut() {
            *digit = !*digit;
            if *digit {
                return;
            }
        }
        self.exhausted = true;
    }
}

impl Iterator for StatesIterator {
    type Item = State;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let mut objects = self.objects.clone();
        for ((atom, values), &digit) in self.open_objects.iter().zip(&self.object_digits) {
            objects.insert(atom.clone(), values[digit]);
        }
        let mut predicates = self.predicates.clone();
        for (atom, &holds) in self.open_atoms.iter().zip(&self.atom_digits) {
            if holds {
                predicates.insert(atom.clone());
            }
        }

        self.generated += 1;
        self.advance();
        Some(State::new(predicates, self.numeric.clone(), objects))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        match self.total() {
            Some(total) => {
                let remaining = total - self.generated;
                (remaining, Some(remaining))
            }
            None => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::Name;
    use crate::search::cnf::Clause;
    use crate::search::{Parameter, Parameters, Signature};

    /// Two blocks, a fluent `on-table/1`, a rigid `heavy/1` with only the
    /// first block heavy, and an object function `(held)` ranging over the
    /// blocks.
    fn enumerator() -> StatesEnumerator {
        let mut symbols = IdManagers::default();
        symbols.types.register(Name::new("object"), 0);
        symbols.constants.register(Name::new("a"), 0);
        symbols.constants.register(Name::new("b"), 0);
        symbols.register_predicate(
            Name::new("on-table"),
            Signature {
                arguments: vec![vec![0]],
                return_types: None,
            },
        );
        symbols.register_predicate(
            Name::new("heavy"),
            Signature {
                arguments: vec![vec![0]],
                return_types: None,
            },
        );
        symbols.register_function(
            Name::new("held"),
            Signature {
                arguments: vec![],
                return_types: Some(vec![0]),
            },
        );
        symbols.register_function(
            Name::new("load"),
            Signature {
                arguments: vec![],
                return_types: None,
            },
        );
        let hierarchy = TypeHierarchy::new(&[BTreeSet::new()], vec![BTreeSet::new(); 2]);
        let heavy_a = Atom::new_grounded(1, &[0]);
        let rigid = RigidRelations::new(
            BTreeSet::from([1]),
            BTreeSet::from([heavy_a.clone()]),
            BTreeSet::new(),
        );
        let initial = State::new(BTreeSet::from([heavy_a]), BTreeMap::new(), BTreeMap::new());
        StatesEnumerator::new(
            Rc::new(symbols),
            Rc::new(hierarchy),
            Rc::new(rigid),
            Rc::new(initial),
        )
    }

    fn on_table(block: ConstantId) -> Atom {
        Atom::new_grounded(0, &[block])
    }

    fn held() -> Atom {
        Atom::new_grounded(0, &[])
    }

    #[test]
    fn state_count_is_product_of_open_choices() {
        let enumerator = enumerator();
        let mut relative = RelativeState::new();
        relative.add_literal(false, on_table(0));
        let states = enumerator.enumerate_states(&relative);
        // one open predicate and one object function with two values
        assert_eq!(states.total(), Some(4));
        let states: Vec<State> = states.collect();
        assert_eq!(states.len(), 4);
        assert_eq!(states.iter().unique().count(), 4);
        for state in &states {
            assert!(relative.evaluate(state));
            assert!(state.has_predicate(&Atom::new_grounded(1, &[0])));
            assert!(!state.has_predicate(&Atom::new_grounded(1, &[1])));
            assert!(state.object_value(&held()).is_some());
        }
    }

    #[test]
    fn contradicting_rigid_atoms_gives_nothing() {
        let mut relative = RelativeState::new();
        relative.add_literal(true, Atom::new_grounded(1, &[0]));
        assert_eq!(enumerator().enumerate_states(&relative).total(), Some(0));
    }

    #[test]
    fn relative_states_of_conditions() {
        // exists ?x: (on-table ?x) and (held) != ?x
        let x = Term::Variable(0);
        let cnf = ConditionsCnf::new(
            BTreeSet::from([
                Clause::unit(Literal::new(
                    false,
                    Proposition::Predicate(Atom::new(0, vec![x.clone()])),
                )),
                Clause::unit(Literal::new(
                    true,
                    Proposition::Equals(Term::ObjectFunction(held()), x),
                )),
            ]),
            Parameters::new(vec![Parameter::new(0, vec![0])]),
        );
        let enumerator = enumerator();
        let relatives = enumerator.enumerate_relative_states(&cnf);
        assert_eq!(relatives.len(), 2);
        for relative in &relatives {
            assert_eq!(relative.positive().len(), 1);
            let (_, value) = relative.object_values().next().unwrap();
            assert!(!relative.positive().contains(&on_table(value)));
        }

        let states = enumerator.enumerate_states_from_conditions(&cnf);
        // (on-table a) with held b and (on-table b) with held a, each with
        // the other block free either way
        assert_eq!(states.len(), 4);
        assert!(states.iter().all(|state| state.object_value(&held()).is_some()));
    }

    #[test]
    fn numeric_equalities_are_solved() {
        let load = NumericExpression::Function(Atom::new_grounded(1, &[]));
        let cnf = ConditionsCnf::new(
            BTreeSet::from([Clause::unit(Literal::new(
                false,
                Proposition::NumericCompare(
                    Comparison::Eq,
                    NumericExpression::Plus(vec![load, NumericExpression::number(5.0)]),
                    NumericExpression::number(12.0),
                ),
            ))]),
            Parameters::empty(),
        );
        let relatives = enumerator().enumerate_relative_states(&cnf);
        assert_eq!(relatives.len(), 1);
        assert_eq!(
            relatives[0].numeric_values().collect::<Vec<_>>(),
            vec![(&Atom::new_grounded(1, &[]), 7.0)]
        );
    }

    #[test]
    fn large_state_spaces_are_enumerated_lazily() {
        // 81 ground atoms of a binary fluent over nine constants
        let mut symbols = IdManagers::default();
        symbols.types.register(Name::new("object"), 0);
        for name in ["a", "b", "c", "d", "e", "f", "g", "h", "i"] {
            symbols.constants.register(Name::new(name), 0);
        }
        symbols.register_predicate(
            Name::new("on"),
            Signature {
                arguments: vec![vec![0], vec![0]],
                return_types: None,
            },
        );
        let hierarchy = TypeHierarchy::new(&[BTreeSet::new()], vec![BTreeSet::new(); 9]);
        let rigid = RigidRelations::new(BTreeSet::new(), BTreeSet::new(), BTreeSet::new());
        let enumerator = StatesEnumerator::new(
            Rc::new(symbols),
            Rc::new(hierarchy),
            Rc::new(rigid),
            Rc::new(State::default()),
        );

        let mut states = enumerator.enumerate_states(&RelativeState::new());
        assert_eq!(states.total(), None);
        assert_eq!(states.size_hint(), (usize::MAX, None));
        let first: Vec<State> = states.by_ref().take(4).collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first.iter().unique().count(), 4);
        assert!(!first[0].has_predicate(&Atom::new_grounded(0, &[0, 0])));
        assert!(first[1].has_predicate(&Atom::new_grounded(0, &[0, 0])));
        assert!(states.next().is_some());
    }

    #[test]
    fn open_object_functions_split_branches() {
        // (on-table (held)) and its negation
        let held_on_table =
            Proposition::Predicate(Atom::new(0, vec![Term::ObjectFunction(held())]));
        for negated in [false, true] {
            let cnf = ConditionsCnf::new(
                BTreeSet::from([Clause::unit(Literal::new(negated, held_on_table.clone()))]),
                Parameters::empty(),
            );
            let enumerator = enumerator();
            let relatives = enumerator.enumerate_relative_states(&cnf);
            assert_eq!(relatives.len(), 2);

            let states = enumerator.enumerate_states_from_conditions(&cnf);
            // held a or b, the held block's table fact fixed, the other free
            assert_eq!(states.len(), 4);
            for state in &states {
                let value = state.object_value(&held()).unwrap();
                assert_eq!(state.has_predicate(&on_table(value)), !negated);
            }
        }
    }
}

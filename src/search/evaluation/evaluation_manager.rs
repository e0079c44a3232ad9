use crate::search::cnf::{ConditionsCnf, Literal, Proposition};
use crate::search::evaluation::{RigidRelations, StateLabels};
use crate::search::grounding::GroundDeep;
use crate::search::{
    Atom, Comparison, ConstantId, Expression, FunctionId, FunctionValues, NumericExpression,
    Parameter, RelativeState, State, Substitution, Term, TypeHierarchy,
};
use std::rc::Rc;

/// Evaluates conditions against complete states, relative states and relaxed
/// planning graph labels.
///
/// Literals are evaluated after deep grounding against the state. A literal
/// that still contains a variable is a bug in the caller and panics; one
/// that refers to an undefined function value is false, and its negation
/// true.
#[derive(Debug, Clone)]
pub struct EvaluationManager {
    hierarchy: Rc<TypeHierarchy>,
    rigid: Rc<RigidRelations>,
}

impl EvaluationManager {
    pub fn new(hierarchy: Rc<TypeHierarchy>, rigid: Rc<RigidRelations>) -> Self {
        Self { hierarchy, rigid }
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    pub fn rigid(&self) -> &RigidRelations {
        &self.rigid
    }

    pub fn evaluate_expression(
        &self,
        expression: &Expression,
        state: &State,
        substitution: &mut Substitution,
    ) -> bool {
        match expression {
            Expression::Truth(value) => *value,
            Expression::Predicate(atom) => self.evaluate_predicate(atom, state, substitution),
            Expression::Equals(a, b) => evaluate_equals(a, b, state, substitution),
            Expression::NumericCompare(comparison, a, b) => {
                evaluate_numeric(*comparison, a, b, state, substitution)
            }
            Expression::And(values) => values
                .iter()
                .all(|v| self.evaluate_expression(v, state, substitution)),
            Expression::Or(values) => values
                .iter()
                .any(|v| self.evaluate_expression(v, state, substitution)),
            Expression::Not(value) => !self.evaluate_expression(value, state, substitution),
            Expression::Imply(a, b) => {
                !self.evaluate_expression(a, state, substitution)
                    || self.evaluate_expression(b, state, substitution)
            }
            Expression::Exists(parameters, value) => {
                self.hierarchy.bindings(parameters).into_iter().any(|binding| {
                    substitution.push_local(binding);
                    let holds = self.evaluate_expression(value, state, substitution);
                    substitution.pop_local();
                    holds
                })
            }
            Expression::ForAll(parameters, value) => {
                self.hierarchy.bindings(parameters).into_iter().all(|binding| {
                    substitution.push_local(binding);
                    let holds = self.evaluate_expression(value, state, substitution);
                    substitution.pop_local();
                    holds
                })
            }
        }
    }

    fn evaluate_predicate(&self, atom: &Atom, state: &State, substitution: &Substitution) -> bool {
        let atom = atom.ground_deep(substitution, state);
        assert!(
            atom.is_grounded(),
            "evaluating a predicate with an unbound variable"
        );
        atom.is_fully_resolved() && state.has_predicate(&atom)
    }

    pub fn evaluate_proposition(
        &self,
        proposition: &Proposition,
        state: &State,
        substitution: &Substitution,
    ) -> bool {
        match proposition {
            Proposition::Predicate(atom) => self.evaluate_predicate(atom, state, substitution),
            Proposition::Equals(a, b) => evaluate_equals(a, b, state, substitution),
            Proposition::NumericCompare(comparison, a, b) => {
                evaluate_numeric(*comparison, a, b, state, substitution)
            }
        }
    }

    #[inline(always)]
    pub fn evaluate_literal(
        &self,
        literal: &Literal,
        state: &State,
        substitution: &Substitution,
    ) -> bool {
        self.evaluate_proposition(literal.underlying(), state, substitution)
            != literal.is_negated()
    }

    /// Whether some assignment of the parameters left open by `substitution`
    /// satisfies every clause.
    pub fn evaluate_cnf(
        &self,
        cnf: &ConditionsCnf,
        state: &State,
        substitution: &Substitution,
    ) -> bool {
        let mut substitution = substitution.clone();
        let open: Vec<Parameter> = cnf
            .parameters()
            .iter()
            .filter(|p| !substitution.contains(p.variable_id))
            .cloned()
            .collect();
        self.exists_binding(&open, &mut substitution, &mut |substitution: &Substitution| {
            cnf.clauses().iter().all(|clause| {
                clause
                    .iter()
                    .any(|literal| self.evaluate_literal(literal, state, substitution))
            })
        })
    }

    /// The truth of a proposition in every state described by the relative
    /// state, `None` when it differs between them.
    pub fn relative_truth(
        &self,
        proposition: &Proposition,
        relative: &RelativeState,
        substitution: &Substitution,
    ) -> Option<bool> {
        match proposition {
            Proposition::Predicate(atom) => {
                let atom = atom.ground_deep(substitution, relative);
                assert!(
                    atom.is_grounded(),
                    "evaluating a predicate with an unbound variable"
                );
                if !atom.is_fully_resolved() {
                    return None;
                }
                self.rigid.predicate_truth(&atom).or_else(|| {
                    if relative.positive().contains(&atom) {
                        Some(true)
                    } else if relative.negative().contains(&atom) {
                        Some(false)
                    } else {
                        None
                    }
                })
            }
            Proposition::Equals(a, b) => Some(
                resolve(a, relative, substitution)? == resolve(b, relative, substitution)?,
            ),
            Proposition::NumericCompare(comparison, a, b) => {
                let lookup = numeric_lookup(relative, substitution);
                Some(comparison.holds(a.evaluate(&lookup)?, b.evaluate(&lookup)?))
            }
        }
    }

    /// Whether every state described by the relative state satisfies the
    /// conditions, for some assignment of the open parameters.
    pub fn evaluate_cnf_relative(
        &self,
        cnf: &ConditionsCnf,
        relative: &RelativeState,
        substitution: &Substitution,
    ) -> bool {
        let mut substitution = substitution.clone();
        let open: Vec<Parameter> = cnf
            .parameters()
            .iter()
            .filter(|p| !substitution.contains(p.variable_id))
            .cloned()
            .collect();
        self.exists_binding(&open, &mut substitution, &mut |substitution: &Substitution| {
            cnf.clauses().iter().all(|clause| {
                clause.iter().any(|literal| {
                    self.relative_truth(literal.underlying(), relative, substitution)
                        == Some(!literal.is_negated())
                })
            })
        })
    }

    /// The smallest number of clauses left unsatisfied by any assignment of
    /// the open parameters.
    pub fn not_accomplished_constraints_count(&self, cnf: &ConditionsCnf, state: &State) -> usize {
        let mut substitution = Substitution::new();
        let open: Vec<Parameter> = cnf.parameters().to_vec();
        let best = self.min_over_bindings(&open, &mut substitution, &mut |substitution: &Substitution| {
            let count = cnf
                .clauses()
                .iter()
                .filter(|clause| {
                    !clause
                        .iter()
                        .any(|literal| self.evaluate_literal(literal, state, substitution))
                })
                .count();
            Some(count as f64)
        });
        best.map_or(cnf.clauses().len(), |count| count as usize)
    }

    /// Forward cost of the conditions under the labels of a relaxed planning
    /// graph built from `origin`: per clause the cheapest literal, combined by
    /// sum (`additive`) or maximum. `None` when some clause is unreachable.
    pub fn label_cost(
        &self,
        cnf: &ConditionsCnf,
        substitution: &Substitution,
        labels: &StateLabels,
        origin: &State,
        additive: bool,
    ) -> Option<f64> {
        let mut substitution = substitution.clone();
        let open: Vec<Parameter> = cnf
            .parameters()
            .iter()
            .filter(|p| !substitution.contains(p.variable_id))
            .cloned()
            .collect();
        self.min_over_bindings(&open, &mut substitution, &mut |substitution: &Substitution| {
            let mut total: f64 = 0.0;
            for clause in cnf.clauses() {
                let cheapest = clause
                    .iter()
                    .filter_map(|literal| self.literal_label(literal, substitution, labels, origin))
                    .min_by(f64::total_cmp)?;
                total = if additive {
                    total + cheapest
                } else {
                    total.max(cheapest)
                };
            }
            Some(total)
        })
    }

    /// Cost of a single literal in a relaxed planning graph. Negative
    /// literals are free unless rigidly false; comparisons are free when
    /// they hold in `origin` or involve a function some effect changes.
    pub fn literal_label(
        &self,
        literal: &Literal,
        substitution: &Substitution,
        labels: &StateLabels,
        origin: &State,
    ) -> Option<f64> {
        let negated = literal.is_negated();
        match literal.underlying() {
            Proposition::Predicate(atom) => {
                let atom = atom.ground_deep(substitution, origin);
                if !atom.is_fully_resolved() {
                    return self.mentions_fluent_function(&atom).then_some(0.0);
                }
                if let Some(truth) = self.rigid.predicate_truth(&atom) {
                    return (truth != negated).then_some(0.0);
                }
                if negated {
                    Some(0.0)
                } else {
                    labels.get(&atom)
                }
            }
            proposition => {
                if self.evaluate_proposition(proposition, origin, substitution) != negated
                    || self.proposition_mentions_fluent_function(proposition)
                {
                    Some(0.0)
                } else {
                    None
                }
            }
        }
    }

    fn mentions_fluent_function(&self, atom: &Atom) -> bool {
        let mut functions = vec![];
        collect_atom_functions(atom, &mut functions);
        functions
            .into_iter()
            .any(|function| !self.rigid.is_static_function(function))
    }

    fn proposition_mentions_fluent_function(&self, proposition: &Proposition) -> bool {
        let mut functions = vec![];
        match proposition {
            Proposition::Predicate(atom) => collect_atom_functions(atom, &mut functions),
            Proposition::Equals(a, b) => {
                collect_term_functions(a, &mut functions);
                collect_term_functions(b, &mut functions);
            }
            Proposition::NumericCompare(_, a, b) => {
                for atom in a.functions().into_iter().chain(b.functions()) {
                    functions.push(atom.name_id);
                    collect_atom_functions(atom, &mut functions);
                }
            }
        }
        functions
            .into_iter()
            .any(|function| !self.rigid.is_static_function(function))
    }

    fn exists_binding<F>(
        &self,
        open: &[Parameter],
        substitution: &mut Substitution,
        test: &mut F,
    ) -> bool
    where
        F: FnMut(&Substitution) -> bool,
    {
        let Some((first, rest)) = open.split_first() else {
            return test(substitution);
        };
        for constant in self.hierarchy.constants_of_types(&first.type_ids) {
            substitution.push_local([(first.variable_id, constant)]);
            let found = self.exists_binding(rest, substitution, test);
            substitution.pop_local();
            if found {
                return true;
            }
        }
        false
    }

    fn min_over_bindings<F>(
        &self,
        open: &[Parameter],
        substitution: &mut Substitution,
        value: &mut F,
    ) -> Option<f64>
    where
        F: FnMut(&Substitution) -> Option<f64>,
    {
        let Some((first, rest)) = open.split_first() else {
            return value(substitution);
        };
        let mut best: Option<f64> = None;
        for constant in self.hierarchy.constants_of_types(&first.type_ids) {
            substitution.push_local([(first.variable_id, constant)]);
            let found = self.min_over_bindings(rest, substitution, value);
            substitution.pop_local();
            best = match (best, found) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            if best == Some(0.0) {
                break;
            }
        }
        best
    }
}

fn collect_term_functions(term: &Term, functions: &mut Vec<FunctionId>) {
    if let Term::ObjectFunction(atom) = term {
        functions.push(atom.name_id);
        collect_atom_functions(atom, functions);
    }
}

fn collect_atom_functions(atom: &Atom, functions: &mut Vec<FunctionId>) {
    for term in &atom.terms {
        collect_term_functions(term, functions);
    }
}

/// The constant a term denotes in `values`, `None` if it involves an
/// undefined function. Panics on unbound variables.
pub(crate) fn resolve<V: FunctionValues>(
    term: &Term,
    values: &V,
    substitution: &Substitution,
) -> Option<ConstantId> {
    match term.ground_deep(substitution, values) {
        Term::Constant(constant) => Some(constant),
        Term::Variable(_) => panic!("evaluating a term with an unbound variable"),
        Term::ObjectFunction(atom) => {
            assert!(
                atom.is_grounded(),
                "evaluating a term with an unbound variable"
            );
            None
        }
    }
}

pub(crate) fn numeric_lookup<'a, V: FunctionValues>(
    values: &'a V,
    substitution: &'a Substitution,
) -> impl Fn(&Atom) -> Option<f64> + 'a {
    move |atom: &Atom| {
        let atom = atom.ground_deep(substitution, values);
        assert!(
            atom.is_grounded(),
            "evaluating a numeric function with an unbound variable"
        );
        if atom.is_fully_resolved() {
            values.numeric_value(&atom)
        } else {
            None
        }
    }
}

fn evaluate_equals(a: &Term, b: &Term, state: &State, substitution: &Substitution) -> bool {
    match (resolve(a, state, substitution), resolve(b, state, substitution)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn evaluate_numeric(
    comparison: Comparison,
    a: &NumericExpression,
    b: &NumericExpression,
    state: &State,
    substitution: &Substitution,
) -> bool {
    let lookup = numeric_lookup(state, substitution);
    match (a.evaluate(&lookup), b.evaluate(&lookup)) {
        (Some(a), Some(b)) => comparison.holds(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{AssignOperator, Parameters};
    use std::collections::BTreeSet;

    // constants 0..3 of type object; predicates p (0, rigid) and q (1);
    // numeric function level (0), object function holder (1)
    fn manager() -> EvaluationManager {
        let hierarchy = TypeHierarchy::new(&[BTreeSet::new()], vec![BTreeSet::new(); 3]);
        let rigid = RigidRelations::new(
            BTreeSet::from([0]),
            BTreeSet::from([Atom::new_grounded(0, &[0])]),
            BTreeSet::from([0]),
        );
        EvaluationManager::new(Rc::new(hierarchy), Rc::new(rigid))
    }

    fn state() -> State {
        let mut state = State::default();
        state.add_predicate(Atom::new_grounded(0, &[0]));
        state.add_predicate(Atom::new_grounded(1, &[2]));
        state.assign_numeric(AssignOperator::Assign, Atom::new_grounded(0, &[]), Some(3.0));
        state.assign_object(Atom::new_grounded(1, &[]), Some(2));
        state
    }

    fn p(id: usize, term: Term) -> Expression {
        Expression::Predicate(Atom::new(id, vec![term]))
    }

    fn expressions() -> Vec<Expression> {
        let holder = Term::ObjectFunction(Atom::new(1, vec![]));
        let level = NumericExpression::Function(Atom::new(0, vec![]));
        let parameters = Parameters::new(vec![Parameter::new(5, vec![])]);
        vec![
            p(1, holder.clone()),
            Expression::not(p(0, Term::Constant(1))),
            Expression::Exists(
                parameters.clone(),
                Box::new(Expression::and([
                    p(1, Term::Variable(5)),
                    Expression::not(Expression::Equals(Term::Variable(5), holder.clone())),
                ])),
            ),
            Expression::ForAll(
                parameters.clone(),
                Box::new(Expression::Imply(
                    Box::new(p(1, Term::Variable(5))),
                    Box::new(Expression::NumericCompare(
                        Comparison::Ge,
                        level.clone(),
                        NumericExpression::number(3.0),
                    )),
                )),
            ),
            Expression::or([
                Expression::and([p(0, Term::Constant(1)), p(1, Term::Constant(1))]),
                Expression::not(Expression::NumericCompare(
                    Comparison::Lt,
                    level,
                    NumericExpression::Function(Atom::new_grounded(0, &[1])),
                )),
            ]),
        ]
    }

    #[test]
    fn tree_evaluation() {
        let manager = manager();
        let state = state();
        let mut substitution = Substitution::new();
        let results: Vec<bool> = expressions()
            .iter()
            .map(|e| manager.evaluate_expression(e, &state, &mut substitution))
            .collect();
        // the last one compares against an undefined function, so the negated
        // comparison holds
        assert_eq!(results, vec![true, true, false, true, true]);
        assert!(substitution.is_empty());
    }

    #[test]
    fn cnf_evaluation_agrees_with_tree_evaluation() {
        let manager = manager();
        let mut states = vec![state(), State::default()];
        let mut other = state();
        other.add_predicate(Atom::new_grounded(1, &[1]));
        other.assign_object(Atom::new_grounded(1, &[]), Some(1));
        other.assign_numeric(AssignOperator::Assign, Atom::new_grounded(0, &[]), Some(1.0));
        states.push(other);

        for expression in expressions() {
            let cnf =
                ConditionsCnf::from_expression(&expression, Parameters::empty(), manager.hierarchy());
            for state in &states {
                let mut substitution = Substitution::new();
                assert_eq!(
                    manager.evaluate_expression(&expression, state, &mut substitution),
                    manager.evaluate_cnf(&cnf, state, &Substitution::new()),
                    "{:?} on {:?}",
                    expression,
                    state
                );
            }
        }
    }

    #[test]
    fn open_parameters_are_existential() {
        let manager = manager();
        let cnf = ConditionsCnf::from_expression(
            &p(1, Term::Variable(7)),
            Parameters::new(vec![Parameter::new(7, vec![])]),
            manager.hierarchy(),
        );
        assert!(manager.evaluate_cnf(&cnf, &state(), &Substitution::new()));
        let bound: Substitution = [(7, 1)].into_iter().collect();
        assert!(!manager.evaluate_cnf(&cnf, &state(), &bound));
        assert_eq!(manager.not_accomplished_constraints_count(&cnf, &state()), 0);
        assert_eq!(
            manager.not_accomplished_constraints_count(&cnf, &State::default()),
            1
        );
    }

    #[test]
    #[should_panic(expected = "unbound variable")]
    fn unbound_variables_panic() {
        let manager = manager();
        let mut substitution = Substitution::new();
        manager.evaluate_expression(&p(1, Term::Variable(3)), &state(), &mut substitution);
    }

    #[test]
    fn relative_evaluation_is_entailment() {
        let manager = manager();
        let mut relative = RelativeState::new();
        relative.add_literal(false, Atom::new_grounded(1, &[2]));
        relative.add_literal(true, Atom::new_grounded(1, &[1]));

        let holds = ConditionsCnf::from_expression(
            &Expression::and([
                p(1, Term::Constant(2)),
                Expression::not(p(1, Term::Constant(1))),
                p(0, Term::Constant(0)),
            ]),
            Parameters::empty(),
            manager.hierarchy(),
        );
        assert!(manager.evaluate_cnf_relative(&holds, &relative, &Substitution::new()));

        // q(c0) is unknown, so neither it nor its negation is entailed
        let unknown = p(1, Term::Constant(0));
        for expression in [unknown.clone(), Expression::not(unknown)] {
            let cnf = ConditionsCnf::from_expression(
                &expression,
                Parameters::empty(),
                manager.hierarchy(),
            );
            assert!(!manager.evaluate_cnf_relative(&cnf, &relative, &Substitution::new()));
        }
    }

    #[test]
    fn relaxed_literal_labels() {
        let manager = manager();
        let origin = State::default();
        let mut labels = StateLabels::new();
        labels.insert_if_absent(Atom::new_grounded(1, &[1]), 2.0);
        labels.insert_if_absent(Atom::new_grounded(1, &[2]), 1.0);

        let cnf = ConditionsCnf::from_expression(
            &Expression::and([
                Expression::or([p(1, Term::Constant(1)), p(1, Term::Constant(0))]),
                p(1, Term::Constant(2)),
                Expression::not(p(1, Term::Constant(0))),
                p(0, Term::Constant(0)),
            ]),
            Parameters::empty(),
            manager.hierarchy(),
        );
        let none = Substitution::new();
        assert_eq!(manager.label_cost(&cnf, &none, &labels, &origin, false), Some(2.0));
        assert_eq!(manager.label_cost(&cnf, &none, &labels, &origin, true), Some(3.0));

        let unreachable = ConditionsCnf::from_expression(
            &p(1, Term::Constant(0)),
            Parameters::empty(),
            manager.hierarchy(),
        );
        assert_eq!(manager.label_cost(&unreachable, &none, &labels, &origin, false), None);
    }
}

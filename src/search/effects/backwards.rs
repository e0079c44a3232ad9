use crate::search::cnf::{junction, ConditionsCnf, Literal, Proposition};
use crate::search::effects::{
    equalities, unify_atoms, EffectsRelevanceConditionsEvaluator, InstantiatedEffect,
    NumericAssignmentsBackwardsReplacer, PrimitiveEffect,
};
use crate::search::evaluation::EvaluationManager;
use crate::search::grounding::Ground;
use crate::search::{
    Atom, Expression, LiftedOperator, RelativeState, StatesEnumerator, Substitution, Term,
    VariableId,
};
use std::collections::BTreeSet;
use tracing::trace;

/// Computes the weakest conditions before an operator that guarantee some
/// conditions after it.
///
/// A predicate holds after the operator if an add effect for it fires, or it
/// held before and no delete for it fires. Object-function terms are replaced
/// by the value of the last assignment to them that fires, and numeric
/// comparisons are rewritten through the numeric assignments. The result is
/// conjoined with the preconditions and normalised back into CNF, with the
/// operator parameters left open by the substitution becoming parameters of
/// the result.
#[derive(Debug, Clone, Copy)]
pub struct EffectsBackwardsConditionsApplier<'a> {
    evaluation: &'a EvaluationManager,
}

impl<'a> EffectsBackwardsConditionsApplier<'a> {
    pub fn new(evaluation: &'a EvaluationManager) -> Self {
        Self { evaluation }
    }

    pub fn apply(
        &self,
        operator: &LiftedOperator,
        substitution: &Substitution,
        goal: &ConditionsCnf,
        first_free_variable: VariableId,
    ) -> ConditionsCnf {
        let goal = separate_variables(operator, goal, first_free_variable);
        let effects = operator
            .effects
            .instantiate(substitution, self.evaluation.hierarchy());

        let mut conjuncts: Vec<Expression> = goal
            .clauses()
            .iter()
            .map(|clause| {
                junction(
                    false,
                    clause
                        .iter()
                        .map(|literal| regress_literal(literal, &effects))
                        .collect(),
                )
            })
            .collect();
        conjuncts.push(operator.preconditions.to_expression().ground(substitution));

        let parameters = goal
            .parameters()
            .merged(&operator.parameters.filtered(|v| !substitution.contains(v)));
        let regressed = ConditionsCnf::from_expression(
            &junction(true, conjuncts),
            parameters,
            self.evaluation.hierarchy(),
        )
        .simplified(self.evaluation.rigid())
        .without_unused_parameters();
        trace!(
            clauses = regressed.clauses().len(),
            parameters = regressed.parameters().len(),
            "regressed conditions"
        );
        regressed
    }

    /// The part of `substitution` that binds variables of effects which may
    /// change a literal of `goal`. Operators that only differ in the other
    /// parameters have the same regression.
    pub fn extract_minimal_operator_substitution(
        &self,
        operator: &LiftedOperator,
        substitution: &Substitution,
        goal: &ConditionsCnf,
    ) -> Substitution {
        let effects = operator
            .effects
            .instantiate(substitution, self.evaluation.hierarchy());
        let entries = EffectsRelevanceConditionsEvaluator::affecting_entries(&effects, goal);
        let mut variables = BTreeSet::new();
        for &position in &entries {
            let entry = &operator.effects.entries()[position];
            entry.primitive.collect_variables(&mut variables);
            if let Some(condition) = &entry.condition {
                variables.extend(condition.free_variables());
            }
        }
        substitution.restricted_to(&variables)
    }
}

/// Regression of complete descriptions: the relative states from which a
/// grounded operator leads into a given relative state.
#[derive(Debug, Clone, Copy)]
pub struct EffectsBackwardsRelativeStateApplier<'a> {
    conditions: EffectsBackwardsConditionsApplier<'a>,
    enumerator: &'a StatesEnumerator,
}

impl<'a> EffectsBackwardsRelativeStateApplier<'a> {
    pub fn new(evaluation: &'a EvaluationManager, enumerator: &'a StatesEnumerator) -> Self {
        Self {
            conditions: EffectsBackwardsConditionsApplier::new(evaluation),
            enumerator,
        }
    }

    pub fn apply(
        &self,
        operator: &LiftedOperator,
        substitution: &Substitution,
        relative: &RelativeState,
        first_free_variable: VariableId,
    ) -> Vec<RelativeState> {
        assert!(
            operator
                .parameters
                .variable_ids()
                .all(|v| substitution.contains(v)),
            "regressing a relative state through a lifted operator"
        );
        let goal = ConditionsCnf::from_conditions(
            &relative.describing_conditions(),
            self.conditions.evaluation.hierarchy(),
        );
        let regressed = self
            .conditions
            .apply(operator, substitution, &goal, first_free_variable);
        self.enumerator.enumerate_relative_states(&regressed)
    }
}

/// Renames the goal parameters when they clash with variables of the
/// operator.
fn separate_variables(
    operator: &LiftedOperator,
    goal: &ConditionsCnf,
    first_free_variable: VariableId,
) -> ConditionsCnf {
    let mut used = goal.variables();
    used.extend(goal.parameters().variable_ids());
    if used.is_disjoint(&operator.variables) {
        return goal.clone();
    }
    let base = goal
        .max_variable_id()
        .max(operator.variables.last().copied())
        .map_or(0, |id| id + 1)
        .max(first_free_variable);
    goal.renamed(base).0
}

fn regress_literal(literal: &Literal, effects: &[InstantiatedEffect]) -> Expression {
    let regressed = regress_proposition(literal.underlying(), effects);
    if literal.is_negated() {
        Expression::not(regressed)
    } else {
        regressed
    }
}

fn regress_proposition(proposition: &Proposition, effects: &[InstantiatedEffect]) -> Expression {
    match proposition {
        Proposition::Predicate(atom) => {
            let cases = term_cases(&atom.terms, effects)
                .into_iter()
                .map(|(mut guard, terms)| {
                    guard.push(regress_predicate(&Atom::new(atom.name_id, terms), effects));
                    junction(true, guard)
                })
                .collect();
            junction(false, cases)
        }
        Proposition::Equals(a, b) => {
            let cases = term_cases(&[a.clone(), b.clone()], effects)
                .into_iter()
                .map(|(mut guard, mut terms)| {
                    let b = terms.pop().expect("two terms");
                    let a = terms.pop().expect("two terms");
                    guard.push(Expression::Equals(a, b));
                    junction(true, guard)
                })
                .collect();
            junction(false, cases)
        }
        Proposition::NumericCompare(comparison, a, b) => {
            NumericAssignmentsBackwardsReplacer::replace(*comparison, a, b, effects)
        }
    }
}

/// `A ∨ (p ∧ ¬D)` for the add conditions `A` and delete conditions `D`.
fn regress_predicate(atom: &Atom, effects: &[InstantiatedEffect]) -> Expression {
    let mut adds = vec![];
    let mut deletes = vec![];
    for effect in effects {
        match &effect.primitive {
            PrimitiveEffect::Add(added) => {
                if let Some(constraints) = unify_atoms(added, atom) {
                    adds.push(fires(effect, &constraints));
                }
            }
            PrimitiveEffect::Delete(deleted) => {
                if let Some(constraints) = unify_atoms(deleted, atom) {
                    deletes.push(fires(effect, &constraints));
                }
            }
            _ => {}
        }
    }
    adds.push(junction(
        true,
        vec![
            Expression::Predicate(atom.clone()),
            Expression::not(junction(false, deletes)),
        ],
    ));
    junction(false, adds)
}

fn fires(effect: &InstantiatedEffect, constraints: &[(Term, Term)]) -> Expression {
    junction(
        true,
        effect
            .condition
            .iter()
            .cloned()
            .chain(equalities(constraints))
            .collect(),
    )
}

/// The terms as they read before the operator, case split over which
/// assignment to each object-function term fires last. Arguments of a
/// function term are regressed first, innermost outwards, and the
/// assignments are then unified against the rewritten function. Each case
/// carries the guard that selects it.
pub(super) fn term_cases(
    terms: &[Term],
    effects: &[InstantiatedEffect],
) -> Vec<(Vec<Expression>, Vec<Term>)> {
    let mut combinations: Vec<(Vec<Expression>, Vec<Term>)> = vec![(vec![], vec![])];
    for term in terms {
        let cases = single_term_cases(term, effects);
        combinations = combinations
            .iter()
            .flat_map(|(guard, prefix)| {
                cases.iter().map(move |(case_guard, replacement)| {
                    let mut guard = guard.clone();
                    guard.extend(case_guard.iter().cloned());
                    let mut terms = prefix.clone();
                    terms.push(replacement.clone());
                    (guard, terms)
                })
            })
            .collect();
    }
    combinations
}

fn single_term_cases(term: &Term, effects: &[InstantiatedEffect]) -> Vec<(Vec<Expression>, Term)> {
    let Term::ObjectFunction(function) = term else {
        return vec![(vec![], term.clone())];
    };
    term_cases(&function.terms, effects)
        .into_iter()
        .flat_map(|(guard, arguments)| {
            let function = Atom::new(function.name_id, arguments);
            assignment_cases(&function, effects)
                .into_iter()
                .map(move |(case_guard, value)| {
                    let mut guard = guard.clone();
                    guard.extend(case_guard);
                    (guard, value)
                })
        })
        .collect()
}

/// The value of `function` after the operator, whose arguments already read
/// as before it, split over which assignment to it fires last.
fn assignment_cases(function: &Atom, effects: &[InstantiatedEffect]) -> Vec<(Vec<Expression>, Term)> {
    let assignments: Vec<(Expression, &Term)> = effects
        .iter()
        .filter_map(|effect| match &effect.primitive {
            PrimitiveEffect::ObjectAssign {
                function: target,
                value,
            } => unify_atoms(target, function).map(|constraints| (fires(effect, &constraints), value)),
            _ => None,
        })
        .filter(|(fires, _)| *fires != Expression::Truth(false))
        .collect();

    let mut cases = vec![];
    for (k, (fires, value)) in assignments.iter().enumerate() {
        let mut guard = vec![fires.clone()];
        guard.extend(
            assignments[k + 1..]
                .iter()
                .map(|(later, _)| Expression::not(later.clone())),
        );
        cases.push((guard, (*value).clone()));
    }
    cases.push((
        assignments
            .iter()
            .map(|(fires, _)| Expression::not(fires.clone()))
            .collect(),
        Term::ObjectFunction(function.clone()),
    ));
    cases
}

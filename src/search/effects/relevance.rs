use crate::search::cnf::{ConditionsCnf, Literal, Proposition};
use crate::search::effects::{unify_atoms, InstantiatedEffect, PrimitiveEffect};
use crate::search::{Atom, RelativeState, Term, TypeHierarchy};
use std::collections::BTreeSet;

/// Outcome of checking an operator against the conditions it should help
/// reach.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relevance {
    /// Some effect may achieve a literal, and no unconditional effect
    /// falsifies a literal the conditions require outright.
    pub relevant: bool,
    /// Indices of the conditional or quantified top-level effects that may
    /// achieve a literal.
    pub conditional_effects: BTreeSet<usize>,
}

pub struct EffectsRelevanceConditionsEvaluator;

impl EffectsRelevanceConditionsEvaluator {
    pub fn evaluate(effects: &[InstantiatedEffect], goal: &ConditionsCnf) -> Relevance {
        let mut relevance = Relevance::default();
        for effect in effects {
            if goal.literals().any(|literal| affects(&effect.primitive, literal)) {
                relevance.relevant = true;
                if effect.conditional {
                    relevance.conditional_effects.insert(effect.index);
                }
            }
        }
        if relevance.relevant {
            let destroyed = goal
                .clauses()
                .iter()
                .filter(|clause| clause.is_unit())
                .flat_map(|clause| clause.iter())
                .any(|literal| destroys(effects, literal));
            relevance.relevant = !destroyed;
        }
        relevance
    }

    /// Indices of every effect entry that may change some literal.
    pub fn affecting_entries(effects: &[InstantiatedEffect], goal: &ConditionsCnf) -> BTreeSet<usize> {
        effects
            .iter()
            .filter(|effect| goal.literals().any(|literal| affects(&effect.primitive, literal)))
            .map(|effect| effect.entry)
            .collect()
    }
}

pub struct EffectsRelevanceRelativeStateEvaluator;

impl EffectsRelevanceRelativeStateEvaluator {
    pub fn evaluate(
        effects: &[InstantiatedEffect],
        relative: &RelativeState,
        hierarchy: &TypeHierarchy,
    ) -> Relevance {
        let goal = ConditionsCnf::from_conditions(&relative.describing_conditions(), hierarchy);
        EffectsRelevanceConditionsEvaluator::evaluate(effects, &goal)
    }
}

/// Whether the effect may make the literal true.
fn affects(effect: &PrimitiveEffect, literal: &Literal) -> bool {
    let negated = literal.is_negated();
    match (effect, literal.underlying()) {
        (PrimitiveEffect::Add(added), Proposition::Predicate(atom)) if !negated => {
            unify_atoms(added, atom).is_some()
        }
        (PrimitiveEffect::Delete(deleted), Proposition::Predicate(atom)) if negated => {
            unify_atoms(deleted, atom).is_some()
        }
        (PrimitiveEffect::Add(_) | PrimitiveEffect::Delete(_), _) => false,
        (
            PrimitiveEffect::NumericAssign { function, .. }
            | PrimitiveEffect::ObjectAssign { function, .. },
            proposition,
        ) => function_atoms(proposition)
            .into_iter()
            .any(|atom| unify_atoms(function, atom).is_some()),
    }
}

/// Whether some unconditional effect makes the ground literal false with
/// no effect that could restore it.
fn destroys(effects: &[InstantiatedEffect], literal: &Literal) -> bool {
    let Proposition::Predicate(atom) = literal.underlying() else {
        return false;
    };
    if !atom.is_fully_resolved() {
        return false;
    }
    let unconditional = |effect: &&InstantiatedEffect| effect.condition.is_none();
    if literal.is_negated() {
        effects
            .iter()
            .filter(unconditional)
            .any(|effect| matches!(&effect.primitive, PrimitiveEffect::Add(added) if added == atom))
    } else {
        let deleted = effects.iter().filter(unconditional).any(
            |effect| matches!(&effect.primitive, PrimitiveEffect::Delete(d) if d == atom),
        );
        deleted
            && !effects.iter().any(|effect| {
                matches!(&effect.primitive, PrimitiveEffect::Add(added) if unify_atoms(added, atom).is_some())
            })
    }
}

/// Every function atom a proposition reads, nested ones included.
fn function_atoms(proposition: &Proposition) -> Vec<&Atom> {
    let mut atoms = vec![];
    match proposition {
        Proposition::Predicate(atom) => collect_from_atom(atom, &mut atoms),
        Proposition::Equals(a, b) => {
            collect_from_term(a, &mut atoms);
            collect_from_term(b, &mut atoms);
        }
        Proposition::NumericCompare(_, a, b) => {
            for function in a.functions().into_iter().chain(b.functions()) {
                atoms.push(function);
                collect_from_atom(function, &mut atoms);
            }
        }
    }
    atoms
}

fn collect_from_term<'a>(term: &'a Term, atoms: &mut Vec<&'a Atom>) {
    if let Term::ObjectFunction(atom) = term {
        atoms.push(atom);
        collect_from_atom(atom, atoms);
    }
}

fn collect_from_atom<'a>(atom: &'a Atom, atoms: &mut Vec<&'a Atom>) {
    for term in &atom.terms {
        collect_from_term(term, atoms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::cnf::Clause;
    use crate::search::{AssignOperator, Comparison, NumericExpression, Parameters};

    fn effect(index: usize, conditional: bool, primitive: PrimitiveEffect) -> InstantiatedEffect {
        InstantiatedEffect {
            entry: index,
            index,
            conditional,
            condition: None,
            primitive,
        }
    }

    fn goal(literals: Vec<Vec<Literal>>) -> ConditionsCnf {
        ConditionsCnf::new(
            literals.into_iter().map(|c| c.into_iter().collect::<Clause>()).collect(),
            Parameters::empty(),
        )
    }

    fn positive(atom: Atom) -> Literal {
        Literal::new(false, Proposition::Predicate(atom))
    }

    #[test]
    fn operator_adding_a_goal_atom_is_relevant() {
        let effects = vec![effect(0, false, PrimitiveEffect::Add(Atom::new_grounded(0, &[1])))];
        let relevance = EffectsRelevanceConditionsEvaluator::evaluate(
            &effects,
            &goal(vec![vec![positive(Atom::new(0, vec![Term::Variable(3)]))]]),
        );
        assert!(relevance.relevant);
        assert!(relevance.conditional_effects.is_empty());

        let relevance = EffectsRelevanceConditionsEvaluator::evaluate(
            &effects,
            &goal(vec![vec![positive(Atom::new_grounded(0, &[2]))]]),
        );
        assert!(!relevance.relevant);
    }

    #[test]
    fn deleting_a_required_atom_makes_it_irrelevant() {
        let p = Atom::new_grounded(0, &[1]);
        let q = Atom::new_grounded(1, &[1]);
        let effects = vec![
            effect(0, false, PrimitiveEffect::Add(q.clone())),
            effect(1, false, PrimitiveEffect::Delete(p.clone())),
        ];
        let relevance = EffectsRelevanceConditionsEvaluator::evaluate(
            &effects,
            &goal(vec![vec![positive(q.clone())], vec![positive(p.clone())]]),
        );
        assert!(!relevance.relevant);

        // in a disjunction the delete is no longer decisive
        let relevance = EffectsRelevanceConditionsEvaluator::evaluate(
            &effects,
            &goal(vec![vec![positive(q), positive(p)]]),
        );
        assert!(relevance.relevant);
    }

    #[test]
    fn numeric_assignments_affect_comparisons() {
        let counter = Atom::new_grounded(2, &[]);
        let effects = vec![effect(
            3,
            true,
            PrimitiveEffect::NumericAssign {
                operator: AssignOperator::Increase,
                function: counter.clone(),
                value: NumericExpression::number(1.0),
            },
        )];
        let comparison = Literal::new(
            false,
            Proposition::NumericCompare(
                Comparison::Ge,
                NumericExpression::Function(counter),
                NumericExpression::number(4.0),
            ),
        );
        let relevance =
            EffectsRelevanceConditionsEvaluator::evaluate(&effects, &goal(vec![vec![comparison]]));
        assert!(relevance.relevant);
        assert_eq!(relevance.conditional_effects, BTreeSet::from([3]));
    }
}

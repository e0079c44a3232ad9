use crate::search::effects::EffectsResult;
use crate::search::State;

pub struct EffectsApplier;

impl EffectsApplier {
    /// The successor of `state`. Deletes are applied before adds, so an atom
    /// both deleted and added holds afterwards. Numeric assignments compose in
    /// effect order; object assignments follow, the last one winning.
    pub fn apply(result: &EffectsResult, state: &State) -> State {
        let mut next = state.clone();
        for atom in &result.deletes {
            next.remove_predicate(atom);
        }
        for atom in &result.adds {
            next.add_predicate(atom.clone());
        }
        for (operator, function, value) in &result.numeric {
            next.assign_numeric(*operator, function.clone(), *value);
        }
        for (function, value) in &result.objects {
            next.assign_object(function.clone(), *value);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::effects::{
        Effect, EffectsResultAtomsCollector, PreprocessedEffects, PrimitiveEffect,
    };
    use crate::search::evaluation::{EvaluationManager, RigidRelations};
    use crate::search::{
        AssignOperator, Atom, Expression, FunctionValues, NumericExpression, Substitution, Term,
        TypeHierarchy,
    };
    use std::collections::{BTreeMap, BTreeSet};
    use std::rc::Rc;

    fn evaluation() -> EvaluationManager {
        let hierarchy = TypeHierarchy::new(&[BTreeSet::new()], vec![BTreeSet::new(); 3]);
        let rigid = RigidRelations::new(BTreeSet::new(), BTreeSet::new(), BTreeSet::new());
        EvaluationManager::new(Rc::new(hierarchy), Rc::new(rigid))
    }

    fn successor(effects: Vec<Effect>, state: &State) -> State {
        let effects = PreprocessedEffects::new(&effects);
        let result = EffectsResultAtomsCollector::collect(
            &effects,
            &Substitution::new(),
            state,
            &evaluation(),
        );
        EffectsApplier::apply(&result, state)
    }

    #[test]
    fn add_wins_over_delete() {
        let p = Atom::new_grounded(0, &[1]);
        let state = State::new(BTreeSet::from([p.clone()]), BTreeMap::new(), BTreeMap::new());
        let next = successor(
            vec![
                Effect::Primitive(PrimitiveEffect::Add(p.clone())),
                Effect::Primitive(PrimitiveEffect::Delete(p.clone())),
            ],
            &state,
        );
        assert!(next.has_predicate(&p));
    }

    #[test]
    fn numeric_effects_compose_on_pre_state_values() {
        let counter = Atom::new_grounded(0, &[]);
        let state = State::new(
            BTreeSet::new(),
            BTreeMap::from([(counter.clone(), 10.0.into())]),
            BTreeMap::new(),
        );
        let function = NumericExpression::Function(counter.clone());
        let next = successor(
            vec![
                Effect::Primitive(PrimitiveEffect::NumericAssign {
                    operator: AssignOperator::Increase,
                    function: counter.clone(),
                    value: NumericExpression::number(5.0),
                }),
                Effect::Primitive(PrimitiveEffect::NumericAssign {
                    operator: AssignOperator::Decrease,
                    function: counter.clone(),
                    value: NumericExpression::number(3.0),
                }),
                // (scale-up counter counter) reads 10, not 12
                Effect::Primitive(PrimitiveEffect::NumericAssign {
                    operator: AssignOperator::ScaleUp,
                    function: counter.clone(),
                    value: function,
                }),
            ],
            &state,
        );
        assert_eq!(next.numeric_value(&counter), Some(120.0));
    }

    #[test]
    fn conditional_effects_see_the_pre_state() {
        let p = Atom::new_grounded(0, &[]);
        let q = Atom::new_grounded(1, &[]);
        let state = State::default();
        let next = successor(
            vec![
                Effect::Primitive(PrimitiveEffect::Add(p.clone())),
                Effect::When(
                    Expression::Predicate(p.clone()),
                    vec![PrimitiveEffect::Add(q.clone())],
                ),
            ],
            &state,
        );
        assert!(next.has_predicate(&p));
        assert!(!next.has_predicate(&q));
    }

    #[test]
    fn object_assignment_reads_pre_state() {
        // (assign (holder) (other)) and (assign (other) c2)
        let holder = Atom::new_grounded(0, &[]);
        let other = Atom::new_grounded(1, &[]);
        let state = State::new(
            BTreeSet::new(),
            BTreeMap::new(),
            BTreeMap::from([(other.clone(), 1)]),
        );
        let next = successor(
            vec![
                Effect::Primitive(PrimitiveEffect::ObjectAssign {
                    function: holder.clone(),
                    value: Term::ObjectFunction(other.clone()),
                }),
                Effect::Primitive(PrimitiveEffect::ObjectAssign {
                    function: other.clone(),
                    value: Term::Constant(2),
                }),
            ],
            &state,
        );
        assert_eq!(next.object_value(&holder), Some(1));
        assert_eq!(next.object_value(&other), Some(2));
    }

    #[test]
    fn effects_on_undefined_object_terms_are_skipped() {
        let target = Atom::new(0, vec![Term::ObjectFunction(Atom::new_grounded(1, &[]))]);
        let next = successor(
            vec![Effect::Primitive(PrimitiveEffect::Add(target))],
            &State::default(),
        );
        assert!(next.predicates().is_empty());
    }
}

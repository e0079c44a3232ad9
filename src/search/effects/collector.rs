use crate::search::effects::{PreprocessedEffects, PrimitiveEffect};
use crate::search::evaluation::{numeric_lookup, resolve, EvaluationManager};
use crate::search::grounding::GroundDeep;
use crate::search::{AssignOperator, Atom, ConstantId, State, Substitution};

/// The changes a grounded operator makes to one state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectsResult {
    pub adds: Vec<Atom>,
    pub deletes: Vec<Atom>,
    /// Assignments in effect order, with their values taken in the state
    /// before the operator.
    pub numeric: Vec<(AssignOperator, Atom, Option<f64>)>,
    pub objects: Vec<(Atom, Option<ConstantId>)>,
}

pub struct EffectsResultAtomsCollector;

impl EffectsResultAtomsCollector {
    /// Collects the effects that fire in `state`. Conditions, target
    /// arguments and assigned values are all evaluated in `state`; targets
    /// that refer to an undefined object function are skipped.
    pub fn collect(
        effects: &PreprocessedEffects,
        substitution: &Substitution,
        state: &State,
        evaluation: &EvaluationManager,
    ) -> EffectsResult {
        let mut result = EffectsResult::default();
        let mut local = Substitution::new();
        for effect in effects.instantiate(substitution, evaluation.hierarchy()) {
            if let Some(condition) = &effect.condition {
                if !evaluation.evaluate_expression(condition, state, &mut local) {
                    continue;
                }
            }
            match &effect.primitive {
                PrimitiveEffect::Add(atom) => {
                    if let Some(atom) = target(atom, state, &local) {
                        result.adds.push(atom);
                    }
                }
                PrimitiveEffect::Delete(atom) => {
                    if let Some(atom) = target(atom, state, &local) {
                        result.deletes.push(atom);
                    }
                }
                PrimitiveEffect::NumericAssign {
                    operator,
                    function,
                    value,
                } => {
                    if let Some(function) = target(function, state, &local) {
                        let value = value.evaluate(&numeric_lookup(state, &local));
                        result.numeric.push((*operator, function, value));
                    }
                }
                PrimitiveEffect::ObjectAssign { function, value } => {
                    if let Some(function) = target(function, state, &local) {
                        let value = resolve(value, state, &local);
                        result.objects.push((function, value));
                    }
                }
            }
        }
        result
    }
}

fn target(atom: &Atom, state: &State, substitution: &Substitution) -> Option<Atom> {
    let atom = atom.ground_deep(substitution, state);
    assert!(
        atom.is_grounded(),
        "applying an effect with an unbound variable"
    );
    atom.is_fully_resolved().then_some(atom)
}

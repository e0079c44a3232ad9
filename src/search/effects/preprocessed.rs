use crate::search::effects::{Effect, PrimitiveEffect};
use crate::search::grounding::Ground;
use crate::search::{Expression, Parameters, Substitution, TypeHierarchy, VariableId};
use std::collections::BTreeSet;

/// A primitive effect together with the quantifiers and conditions it sits
/// under in the domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectEntry {
    /// Position of the enclosing top-level effect.
    pub index: usize,
    /// Variables of the enclosing `forall` effects.
    pub parameters: Parameters,
    /// Conjunction of the enclosing `when` conditions.
    pub condition: Option<Expression>,
    pub primitive: PrimitiveEffect,
}

impl EffectEntry {
    /// Whether the effect fires only under some condition or once per
    /// quantifier assignment.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some() || !self.parameters.is_empty()
    }
}

/// An entry after grounding its quantified variables with one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstantiatedEffect {
    /// Position of the originating entry in [`PreprocessedEffects::entries`].
    pub entry: usize,
    pub index: usize,
    pub conditional: bool,
    pub condition: Option<Expression>,
    pub primitive: PrimitiveEffect,
}

/// The effects of an operator flattened into primitive entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PreprocessedEffects {
    entries: Vec<EffectEntry>,
    delete_relaxation: bool,
}

impl PreprocessedEffects {
    pub fn new(effects: &[Effect]) -> Self {
        let mut entries = vec![];
        for (index, effect) in effects.iter().enumerate() {
            flatten(index, effect, &Parameters::empty(), None, &mut entries);
        }
        Self {
            entries,
            delete_relaxation: false,
        }
    }

    /// The same effects with every delete ignored.
    pub fn with_delete_relaxation(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            delete_relaxation: true,
        }
    }

    pub fn is_delete_relaxed(&self) -> bool {
        self.delete_relaxation
    }

    pub fn entries(&self) -> &[EffectEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn collect_variables(&self, variables: &mut BTreeSet<VariableId>) {
        for entry in &self.entries {
            variables.extend(entry.parameters.variable_ids());
            entry.primitive.collect_variables(variables);
            if let Some(condition) = &entry.condition {
                variables.extend(condition.free_variables());
            }
        }
    }

    /// Grounds the entries with `substitution`, expanding every `forall`
    /// over the admissible constants. Variables the substitution leaves
    /// unbound stay in place. Entries keep their order.
    pub fn instantiate(
        &self,
        substitution: &Substitution,
        hierarchy: &TypeHierarchy,
    ) -> Vec<InstantiatedEffect> {
        let mut substitution = substitution.clone();
        let mut result = vec![];
        for (position, entry) in self.entries.iter().enumerate() {
            if self.delete_relaxation && matches!(entry.primitive, PrimitiveEffect::Delete(_)) {
                continue;
            }
            for binding in hierarchy.bindings(&entry.parameters) {
                substitution.push_local(binding);
                result.push(InstantiatedEffect {
                    entry: position,
                    index: entry.index,
                    conditional: entry.is_conditional(),
                    condition: entry.condition.as_ref().map(|c| c.ground(&substitution)),
                    primitive: entry.primitive.ground(&substitution),
                });
                substitution.pop_local();
            }
        }
        result
    }
}

fn flatten(
    index: usize,
    effect: &Effect,
    parameters: &Parameters,
    condition: Option<&Expression>,
    entries: &mut Vec<EffectEntry>,
) {
    match effect {
        Effect::Primitive(primitive) => entries.push(EffectEntry {
            index,
            parameters: parameters.clone(),
            condition: condition.cloned(),
            primitive: primitive.clone(),
        }),
        Effect::When(when, primitives) => {
            let combined = match condition {
                Some(outer) => Expression::and([outer.clone(), when.clone()]),
                None => when.clone(),
            };
            for primitive in primitives {
                entries.push(EffectEntry {
                    index,
                    parameters: parameters.clone(),
                    condition: Some(combined.clone()),
                    primitive: primitive.clone(),
                });
            }
        }
        Effect::ForAll(quantified, effects) => {
            let parameters = parameters.merged(quantified);
            for effect in effects {
                flatten(index, effect, &parameters, condition, entries);
            }
        }
    }
}

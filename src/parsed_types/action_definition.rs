//! Contains action definitions via the [`ActionDefinition`] type.

use crate::parsed_types::{EffectDefinition, GoalDefinition, Name, TypedVariables};

/// An action definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDefinition {
    name: Name,
    parameters: TypedVariables,
    precondition: GoalDefinition,
    effects: Vec<EffectDefinition>,
}

impl ActionDefinition {
    pub fn new(
        name: Name,
        parameters: TypedVariables,
        precondition: Option<GoalDefinition>,
        effects: Vec<EffectDefinition>,
    ) -> Self {
        Self {
            name,
            parameters,
            precondition: precondition.unwrap_or_else(GoalDefinition::empty),
            effects,
        }
    }

    pub const fn name(&self) -> &Name {
        &self.name
    }

    pub const fn parameters(&self) -> &TypedVariables {
        &self.parameters
    }

    pub const fn precondition(&self) -> &GoalDefinition {
        &self.precondition
    }

    pub fn effects(&self) -> &[EffectDefinition] {
        &self.effects
    }
}

impl AsRef<Name> for ActionDefinition {
    fn as_ref(&self) -> &Name {
        &self.name
    }
}

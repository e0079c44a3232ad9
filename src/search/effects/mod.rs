//! Operator effects: forward application, relevance and backward
//! regression.

mod applier;
mod backwards;
mod collector;
mod numeric_replacer;
mod preprocessed;
mod relevance;
mod unification;

pub use applier::EffectsApplier;
pub use backwards::{EffectsBackwardsConditionsApplier, EffectsBackwardsRelativeStateApplier};
pub use collector::{EffectsResult, EffectsResultAtomsCollector};
pub use numeric_replacer::NumericAssignmentsBackwardsReplacer;
pub use preprocessed::{EffectEntry, InstantiatedEffect, PreprocessedEffects};
pub use relevance::{
    EffectsRelevanceConditionsEvaluator, EffectsRelevanceRelativeStateEvaluator, Relevance,
};
pub use unification::{equalities, unify_atoms};

use crate::search::{
    AssignOperator, Atom, Expression, IdManagers, NumericExpression, Parameters, Term, VariableId,
};
use std::collections::BTreeSet;

/// An effect without conditions or quantifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveEffect {
    Add(Atom),
    Delete(Atom),
    NumericAssign {
        operator: AssignOperator,
        function: Atom,
        value: NumericExpression,
    },
    ObjectAssign {
        function: Atom,
        value: Term,
    },
}

impl PrimitiveEffect {
    /// The predicate or function atom the effect changes.
    pub fn target(&self) -> &Atom {
        match self {
            PrimitiveEffect::Add(atom) | PrimitiveEffect::Delete(atom) => atom,
            PrimitiveEffect::NumericAssign { function, .. }
            | PrimitiveEffect::ObjectAssign { function, .. } => function,
        }
    }

    pub fn collect_variables(&self, variables: &mut BTreeSet<VariableId>) {
        match self {
            PrimitiveEffect::Add(atom) | PrimitiveEffect::Delete(atom) => {
                atom.collect_variables(variables)
            }
            PrimitiveEffect::NumericAssign {
                function, value, ..
            } => {
                function.collect_variables(variables);
                value.collect_variables(variables);
            }
            PrimitiveEffect::ObjectAssign { function, value } => {
                function.collect_variables(variables);
                value.collect_variables(variables);
            }
        }
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        match self {
            PrimitiveEffect::Add(atom) => atom.human_readable_predicate(symbols),
            PrimitiveEffect::Delete(atom) => {
                format!("(not {})", atom.human_readable_predicate(symbols))
            }
            PrimitiveEffect::NumericAssign {
                operator,
                function,
                value,
            } => format!(
                "({} {} {})",
                operator.keyword(),
                function.human_readable_function(symbols),
                value.human_readable(symbols)
            ),
            PrimitiveEffect::ObjectAssign { function, value } => format!(
                "(assign {} {})",
                function.human_readable_function(symbols),
                value.human_readable(symbols)
            ),
        }
    }
}

/// An operator effect as written in the domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Effect {
    Primitive(PrimitiveEffect),
    /// Effects that only fire when the condition holds before the operator is
    /// applied.
    When(Expression, Vec<PrimitiveEffect>),
    /// Effects applied once for every assignment of the parameters.
    ForAll(Parameters, Vec<Effect>),
}

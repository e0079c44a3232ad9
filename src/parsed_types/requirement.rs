//! Contains requirements via the [`Requirement`] and [`Requirements`] types.

use std::collections::BTreeSet;
use std::ops::Deref;
use strum_macros::{Display, EnumIter, EnumString};

/// A PDDL requirement flag, e.g. `:strips` or `:numeric-fluents`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
)]
pub enum Requirement {
    #[strum(serialize = ":strips")]
    Strips,
    #[strum(serialize = ":typing")]
    Typing,
    #[strum(serialize = ":negative-preconditions")]
    NegativePreconditions,
    #[strum(serialize = ":disjunctive-preconditions")]
    DisjunctivePreconditions,
    #[strum(serialize = ":equality")]
    Equality,
    #[strum(serialize = ":existential-preconditions")]
    ExistentialPreconditions,
    #[strum(serialize = ":universal-preconditions")]
    UniversalPreconditions,
    #[strum(serialize = ":quantified-preconditions")]
    QuantifiedPreconditions,
    #[strum(serialize = ":conditional-effects")]
    ConditionalEffects,
    #[strum(serialize = ":fluents")]
    Fluents,
    #[strum(serialize = ":numeric-fluents")]
    NumericFluents,
    #[strum(serialize = ":object-fluents")]
    ObjectFluents,
    #[strum(serialize = ":adl")]
    Adl,
    #[strum(serialize = ":durative-actions")]
    DurativeActions,
    #[strum(serialize = ":duration-inequalities")]
    DurationInequalities,
    #[strum(serialize = ":continuous-effects")]
    ContinuousEffects,
    #[strum(serialize = ":derived-predicates")]
    DerivedPredicates,
    #[strum(serialize = ":timed-initial-literals")]
    TimedInitialLiterals,
    #[strum(serialize = ":preferences")]
    Preferences,
    #[strum(serialize = ":constraints")]
    Constraints,
    #[strum(serialize = ":action-costs")]
    ActionCosts,
}

impl Requirement {
    /// The requirements directly implied by this one. The closure is taken
    /// transitively by [`Requirements::insert`].
    pub const fn implied(&self) -> &'static [Requirement] {
        use Requirement::*;
        match self {
            Adl => &[
                Strips,
                Typing,
                NegativePreconditions,
                DisjunctivePreconditions,
                Equality,
                QuantifiedPreconditions,
                ConditionalEffects,
            ],
            QuantifiedPreconditions => &[ExistentialPreconditions, UniversalPreconditions],
            Fluents => &[NumericFluents, ObjectFluents],
            TimedInitialLiterals => &[DurativeActions],
            _ => &[],
        }
    }

    /// Whether the planning core can handle problems using this requirement.
    pub const fn is_supported(&self) -> bool {
        use Requirement::*;
        !matches!(
            self,
            DurativeActions
                | DurationInequalities
                | ContinuousEffects
                | DerivedPredicates
                | TimedInitialLiterals
                | Preferences
                | Constraints
        )
    }
}

/// A set of requirements, closed under [`Requirement::implied`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements(BTreeSet<Requirement>);

impl Requirements {
    pub fn new<I: IntoIterator<Item = Requirement>>(requirements: I) -> Self {
        let mut result = Self::default();
        for requirement in requirements {
            result.insert(requirement);
        }
        result
    }

    /// Insert a requirement together with everything it implies.
    pub fn insert(&mut self, requirement: Requirement) {
        let mut pending = vec![requirement];
        while let Some(requirement) = pending.pop() {
            if self.0.insert(requirement) {
                pending.extend_from_slice(requirement.implied());
            }
        }
    }

    pub fn contains(&self, requirement: Requirement) -> bool {
        self.0.contains(&requirement)
    }

    pub fn unsupported(&self) -> impl Iterator<Item = &Requirement> {
        self.0.iter().filter(|requirement| !requirement.is_supported())
    }
}

impl Deref for Requirements {
    type Target = BTreeSet<Requirement>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Requirement> for Requirements {
    fn from_iter<T: IntoIterator<Item = Requirement>>(iter: T) -> Self {
        Requirements::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn adl_implies_quantified_closure() {
        let requirements = Requirements::new([Requirement::Adl]);
        assert!(requirements.contains(Requirement::Strips));
        assert!(requirements.contains(Requirement::Typing));
        assert!(requirements.contains(Requirement::ConditionalEffects));
        // transitively through :quantified-preconditions
        assert!(requirements.contains(Requirement::ExistentialPreconditions));
        assert!(requirements.contains(Requirement::UniversalPreconditions));
        assert!(!requirements.contains(Requirement::NumericFluents));
        assert_eq!(requirements.len(), 10);
    }

    #[test]
    fn names_round_trip_through_strum() {
        assert_eq!(
            Requirement::from_str(":numeric-fluents").unwrap(),
            Requirement::NumericFluents
        );
        assert_eq!(Requirement::ActionCosts.to_string(), ":action-costs");
        assert!(Requirement::from_str(":unknown").is_err());
    }

    #[test]
    fn implications_stay_within_supported_requirements() {
        for requirement in Requirement::iter().filter(Requirement::is_supported) {
            assert!(requirement.implied().iter().all(Requirement::is_supported));
            assert_eq!(Requirement::from_str(&requirement.to_string()).unwrap(), requirement);
        }
    }

    #[test]
    fn durative_actions_are_unsupported() {
        let requirements = Requirements::new([Requirement::TimedInitialLiterals]);
        assert_eq!(requirements.unsupported().count(), 2);
    }
}

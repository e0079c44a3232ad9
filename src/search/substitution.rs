use crate::search::{ConstantId, VariableId};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Mapping from variable ids to constant ids.
///
/// Quantifier instantiation pushes a local frame of bindings on top of the
/// existing ones and pops it afterwards, so the same map is reused for every
/// instantiation instead of being cloned. Equality and hashing only look at
/// the current bindings.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    values: BTreeMap<VariableId, ConstantId>,
    /// Previous values of the variables bound by each pushed frame.
    frames: Vec<Vec<(VariableId, Option<ConstantId>)>>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `variable` to `constant`, replacing any previous binding.
    pub fn add(&mut self, variable: VariableId, constant: ConstantId) {
        self.values.insert(variable, constant);
    }

    pub fn remove(&mut self, variable: VariableId) -> Option<ConstantId> {
        self.values.remove(&variable)
    }

    #[inline(always)]
    pub fn value(&self, variable: VariableId) -> Option<ConstantId> {
        self.values.get(&variable).copied()
    }

    #[inline(always)]
    pub fn contains(&self, variable: VariableId) -> bool {
        self.values.contains_key(&variable)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, ConstantId)> + '_ {
        self.values.iter().map(|(&variable, &constant)| (variable, constant))
    }

    /// Binds every pair in `bindings` until the matching [`Self::pop_local`].
    pub fn push_local<I>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (VariableId, ConstantId)>,
    {
        let frame = bindings
            .into_iter()
            .map(|(variable, constant)| (variable, self.values.insert(variable, constant)))
            .collect();
        self.frames.push(frame);
    }

    /// Restores the bindings that were shadowed by the last pushed frame.
    pub fn pop_local(&mut self) {
        let frame = self
            .frames
            .pop()
            .expect("pop_local called without a matching push_local");
        for (variable, previous) in frame.into_iter().rev() {
            match previous {
                Some(constant) => self.values.insert(variable, constant),
                None => self.values.remove(&variable),
            };
        }
    }

    /// A substitution holding only the bindings of the given variables.
    pub fn restricted_to<'a, I>(&self, variables: I) -> Substitution
    where
        I: IntoIterator<Item = &'a VariableId>,
    {
        variables
            .into_iter()
            .filter_map(|&variable| self.value(variable).map(|constant| (variable, constant)))
            .collect()
    }

    /// Whether the two substitutions agree on every variable they both bind.
    pub fn is_compatible_with(&self, other: &Substitution) -> bool {
        self.iter()
            .all(|(variable, constant)| other.value(variable).map_or(true, |c| c == constant))
    }
}

impl PartialEq for Substitution {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Substitution {}

impl Hash for Substitution {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl FromIterator<(VariableId, ConstantId)> for Substitution {
    fn from_iter<T: IntoIterator<Item = (VariableId, ConstantId)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
            frames: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_frames_restore_shadowed_bindings() {
        let mut substitution: Substitution = [(0, 5), (1, 6)].into_iter().collect();
        substitution.push_local([(1, 7), (2, 8)]);
        assert_eq!(substitution.value(1), Some(7));
        assert_eq!(substitution.value(2), Some(8));

        substitution.push_local([(2, 9)]);
        assert_eq!(substitution.value(2), Some(9));
        substitution.pop_local();
        assert_eq!(substitution.value(2), Some(8));

        substitution.pop_local();
        assert_eq!(substitution.value(0), Some(5));
        assert_eq!(substitution.value(1), Some(6));
        assert!(!substitution.contains(2));
    }

    #[test]
    #[should_panic]
    fn unbalanced_pop_is_a_bug() {
        Substitution::new().pop_local();
    }

    #[test]
    fn restriction_and_equality_ignore_frames() {
        let mut substitution: Substitution = [(0, 1), (1, 2), (2, 3)].into_iter().collect();
        let restricted = substitution.restricted_to(&[0, 2, 9]);
        assert_eq!(restricted, [(0, 1), (2, 3)].into_iter().collect());

        substitution.push_local(std::iter::empty());
        let plain: Substitution = [(0, 1), (1, 2), (2, 3)].into_iter().collect();
        assert_eq!(substitution, plain);
        assert!(restricted.is_compatible_with(&plain));
        assert!(!restricted.is_compatible_with(&[(0, 4)].into_iter().collect()));
    }
}

use crate::search::{IdManagers, TypeId, VariableId};
use std::collections::BTreeMap;
use std::ops::Deref;

/// A variable together with the types admissible for it. An empty type list
/// admits every constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Parameter {
    pub variable_id: VariableId,
    pub type_ids: Vec<TypeId>,
}

impl Parameter {
    pub fn new(variable_id: VariableId, type_ids: Vec<TypeId>) -> Self {
        Self {
            variable_id,
            type_ids,
        }
    }
}

/// Ordered parameter list of an operator, a quantifier or a set of
/// conditions. Two lists sharing a variable id are conflicted and have to be
/// renamed apart before the conditions using them are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self(parameters)
    }

    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn push(&mut self, parameter: Parameter) {
        self.0.push(parameter);
    }

    pub fn get(&self, variable_id: VariableId) -> Option<&Parameter> {
        self.0.iter().find(|p| p.variable_id == variable_id)
    }

    pub fn contains(&self, variable_id: VariableId) -> bool {
        self.get(variable_id).is_some()
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.0.iter().map(|p| p.variable_id)
    }

    pub fn max_variable_id(&self) -> Option<VariableId> {
        self.variable_ids().max()
    }

    pub fn is_conflicted_with(&self, other: &Parameters) -> bool {
        self.variable_ids().any(|id| other.contains(id))
    }

    /// Gives the parameters consecutive ids starting at `base`, returning the
    /// renamed list and the mapping from old to new ids.
    pub fn renamed(&self, base: VariableId) -> (Parameters, BTreeMap<VariableId, VariableId>) {
        let mut mapping = BTreeMap::new();
        let renamed = self
            .0
            .iter()
            .enumerate()
            .map(|(offset, parameter)| {
                mapping.insert(parameter.variable_id, base + offset);
                Parameter::new(base + offset, parameter.type_ids.clone())
            })
            .collect();
        (Parameters(renamed), mapping)
    }

    /// Concatenation of two parameter lists. Panics if they are conflicted,
    /// callers rename first.
    pub fn merged(&self, other: &Parameters) -> Parameters {
        assert!(
            !self.is_conflicted_with(other),
            "merging conflicted parameter lists"
        );
        Parameters(self.0.iter().chain(other.0.iter()).cloned().collect())
    }

    /// The parameters whose variable passes `keep`, in order.
    pub fn filtered<F: Fn(VariableId) -> bool>(&self, keep: F) -> Parameters {
        Parameters(
            self.0
                .iter()
                .filter(|p| keep(p.variable_id))
                .cloned()
                .collect(),
        )
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        self.0
            .iter()
            .map(|parameter| {
                let types = parameter
                    .type_ids
                    .iter()
                    .map(|&t| symbols.types.name(t).to_string())
                    .collect::<Vec<_>>();
                match types.len() {
                    0 => symbols.variable_name(parameter.variable_id),
                    1 => format!("{} - {}", symbols.variable_name(parameter.variable_id), types[0]),
                    _ => format!(
                        "{} - (either {})",
                        symbols.variable_name(parameter.variable_id),
                        types.join(" ")
                    ),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Deref for Parameters {
    type Target = [Parameter];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<T: IntoIterator<Item = Parameter>>(iter: T) -> Self {
        Parameters(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(ids: &[VariableId]) -> Parameters {
        ids.iter().map(|&id| Parameter::new(id, vec![1])).collect()
    }

    #[test]
    fn renaming_removes_conflicts() {
        let first = parameters(&[0, 1]);
        let second = parameters(&[1, 2]);
        assert!(first.is_conflicted_with(&second));

        let base = first.max_variable_id().max(second.max_variable_id()).unwrap() + 1;
        let (renamed, mapping) = second.renamed(base);
        assert_eq!(renamed.variable_ids().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(mapping[&1], 3);
        assert_eq!(mapping[&2], 4);
        assert!(!first.is_conflicted_with(&renamed));

        let merged = first.merged(&renamed);
        assert_eq!(merged.len(), 4);
        assert_eq!(merged.max_variable_id(), Some(4));
    }

    #[test]
    #[should_panic(expected = "conflicted")]
    fn merging_conflicted_lists_panics() {
        parameters(&[0]).merged(&parameters(&[0]));
    }
}

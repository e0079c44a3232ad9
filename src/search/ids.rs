//! Symbol tables mapping names to dense integer ids.

use crate::parsed_types::Name;
use std::collections::HashMap;

pub type PredicateId = usize;
pub type FunctionId = usize;
pub type ConstantId = usize;
pub type TypeId = usize;
pub type VariableId = usize;

/// The id of the root type `object`, always registered first.
pub const OBJECT_TYPE_ID: TypeId = 0;

/// Assigns dense ids to `(name, arity)` pairs. The same name may be registered
/// with several arities, each variant getting its own id.
#[derive(Debug, Clone, Default)]
pub struct IdManager {
    ids: HashMap<(Name, usize), usize>,
    entries: Vec<(Name, usize)>,
}

impl IdManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the pair and returns its id. Registering an already known
    /// pair returns the existing id.
    pub fn register(&mut self, name: Name, arity: usize) -> usize {
        if let Some(&id) = self.ids.get(&(name, arity)) {
            return id;
        }
        let id = self.entries.len();
        self.ids.insert((name, arity), id);
        self.entries.push((name, arity));
        id
    }

    pub fn get_id(&self, name: &Name, arity: usize) -> Option<usize> {
        self.ids.get(&(*name, arity)).copied()
    }

    pub fn name(&self, id: usize) -> &Name {
        &self
            .entries
            .get(id)
            .unwrap_or_else(|| panic!("id {} is not registered", id))
            .0
    }

    pub fn arity(&self, id: usize) -> usize {
        self.entries
            .get(id)
            .unwrap_or_else(|| panic!("id {} is not registered", id))
            .1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Name, usize)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, (name, arity))| (id, name, *arity))
    }
}

/// Hands out a fresh id for every registration, so that every variable of
/// every lifted construct lives in its own id space.
#[derive(Debug, Clone, Default)]
pub struct VariableIdManager {
    names: Vec<Name>,
}

impl VariableIdManager {
    pub fn register_fresh(&mut self, name: Name) -> VariableId {
        self.names.push(name);
        self.names.len() - 1
    }

    /// The source name of a variable. Variables created by renaming have no
    /// source name.
    pub fn name(&self, id: VariableId) -> Option<&Name> {
        self.names.get(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Argument and return types of a predicate or function. Each position lists
/// the alternative types it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub arguments: Vec<Vec<TypeId>>,
    /// `None` for predicates and numeric functions.
    pub return_types: Option<Vec<TypeId>>,
}

/// All symbol tables of a planning problem.
#[derive(Debug, Clone, Default)]
pub struct IdManagers {
    pub predicates: IdManager,
    pub functions: IdManager,
    pub constants: IdManager,
    pub types: IdManager,
    pub variables: VariableIdManager,
    pub predicate_signatures: Vec<Signature>,
    pub function_signatures: Vec<Signature>,
}

impl IdManagers {
    pub fn register_predicate(&mut self, name: Name, signature: Signature) -> PredicateId {
        let id = self.predicates.register(name, signature.arguments.len());
        if id == self.predicate_signatures.len() {
            self.predicate_signatures.push(signature);
        }
        id
    }

    pub fn register_function(&mut self, name: Name, signature: Signature) -> FunctionId {
        let id = self.functions.register(name, signature.arguments.len());
        if id == self.function_signatures.len() {
            self.function_signatures.push(signature);
        }
        id
    }

    pub fn is_object_function(&self, function: FunctionId) -> bool {
        self.function_signatures[function].return_types.is_some()
    }

    pub fn variable_name(&self, id: VariableId) -> String {
        match self.variables.name(id) {
            Some(name) => format!("?{}", name),
            None => format!("?v{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_different_arity() {
        let mut manager = IdManager::new();
        let unary = manager.register(Name::new("at"), 1);
        let binary = manager.register(Name::new("at"), 2);
        assert_ne!(unary, binary);
        assert_eq!(manager.register(Name::new("AT"), 1), unary);
        assert_eq!(manager.get_id(&Name::new("at"), 2), Some(binary));
        assert_eq!(manager.get_id(&Name::new("at"), 3), None);
        assert_eq!(manager.arity(binary), 2);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn variables_are_always_fresh() {
        let mut variables = VariableIdManager::default();
        let first = variables.register_fresh(Name::new("x"));
        let second = variables.register_fresh(Name::new("x"));
        assert_ne!(first, second);
        assert_eq!(variables.name(second), Some(&Name::new("x")));
        assert_eq!(variables.name(10), None);
    }
}

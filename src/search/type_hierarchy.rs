use crate::search::{ConstantId, Parameters, TypeId, VariableId, OBJECT_TYPE_ID};
use itertools::Itertools;
use std::collections::BTreeSet;

/// Subtype closure of the declared types together with the constants of each
/// type. A constant declared with several types (or declared twice) carries
/// the union of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeHierarchy {
    /// Reflexive-transitive supertypes of each type.
    supertypes: Vec<BTreeSet<TypeId>>,
    /// Declared types of each constant.
    constant_types: Vec<BTreeSet<TypeId>>,
    /// All constants whose declared type is a subtype of the indexed type.
    constants_by_type: Vec<Vec<ConstantId>>,
}

impl TypeHierarchy {
    /// Builds the hierarchy from the direct parents of each type and the
    /// declared types of each constant. Types without parents are children of
    /// `object`.
    pub fn new(parents: &[BTreeSet<TypeId>], constant_types: Vec<BTreeSet<TypeId>>) -> Self {
        let supertypes: Vec<BTreeSet<TypeId>> = (0..parents.len())
            .map(|type_id| {
                let mut closure = BTreeSet::from([type_id, OBJECT_TYPE_ID]);
                let mut pending = vec![type_id];
                while let Some(current) = pending.pop() {
                    for &parent in &parents[current] {
                        if closure.insert(parent) {
                            pending.push(parent);
                        }
                    }
                }
                closure
            })
            .collect();

        let mut constants_by_type = vec![vec![]; parents.len()];
        for (constant, types) in constant_types.iter().enumerate() {
            let mut reachable = BTreeSet::from([OBJECT_TYPE_ID]);
            for &declared in types {
                reachable.extend(supertypes[declared].iter().copied());
            }
            for type_id in reachable {
                constants_by_type[type_id].push(constant);
            }
        }

        Self {
            supertypes,
            constant_types,
            constants_by_type,
        }
    }

    pub fn len(&self) -> usize {
        self.supertypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supertypes.is_empty()
    }

    /// Whether `sub` equals `sup` or is a (transitive) subtype of it.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        self.supertypes[sub].contains(&sup)
    }

    pub fn subtypes(&self, type_id: TypeId) -> Vec<TypeId> {
        (0..self.supertypes.len())
            .filter(|&candidate| self.is_subtype(candidate, type_id))
            .collect()
    }

    pub fn constant_types(&self, constant: ConstantId) -> &BTreeSet<TypeId> {
        &self.constant_types[constant]
    }

    pub fn constants_of_type(&self, type_id: TypeId) -> &[ConstantId] {
        &self.constants_by_type[type_id]
    }

    /// Constants admissible for a position accepting any of `types`, sorted
    /// and without duplicates. An empty type list admits every constant.
    pub fn constants_of_types(&self, types: &[TypeId]) -> Vec<ConstantId> {
        match types {
            [] => self.constants_by_type[OBJECT_TYPE_ID].clone(),
            [single] => self.constants_by_type[*single].clone(),
            _ => types
                .iter()
                .flat_map(|&type_id| self.constants_by_type[type_id].iter().copied())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }

    /// Every assignment of admissible constants to the parameters, in
    /// lexicographic order. A single empty assignment when there are no
    /// parameters.
    pub fn bindings(&self, parameters: &Parameters) -> Vec<Vec<(VariableId, ConstantId)>> {
        if parameters.is_empty() {
            return vec![vec![]];
        }
        parameters
            .iter()
            .map(|parameter| {
                self.constants_of_types(&parameter.type_ids)
                    .into_iter()
                    .map(|constant| (parameter.variable_id, constant))
                    .collect::<Vec<_>>()
            })
            .multi_cartesian_product()
            .collect()
    }

    /// Registers the declared types of a constant, taking the union with any
    /// types it was declared with before.
    pub fn add_constant(&mut self, constant: ConstantId, types: &BTreeSet<TypeId>) {
        if constant >= self.constant_types.len() {
            self.constant_types.resize(constant + 1, BTreeSet::new());
        }
        self.constant_types[constant].extend(types.iter().copied());

        let mut reachable = BTreeSet::from([OBJECT_TYPE_ID]);
        for &declared in types {
            reachable.extend(self.supertypes[declared].iter().copied());
        }
        for type_id in reachable {
            let constants = &mut self.constants_by_type[type_id];
            if let Err(position) = constants.binary_search(&constant) {
                constants.insert(position, constant);
            }
        }
    }

    pub fn constant_has_type(&self, constant: ConstantId, types: &[TypeId]) -> bool {
        types.is_empty()
            || self.constant_types[constant].iter().any(|&declared| {
                types
                    .iter()
                    .any(|&required| self.is_subtype(declared, required))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // object(0) <- vehicle(1) <- truck(2); location(3)
    fn hierarchy() -> TypeHierarchy {
        let parents = vec![
            BTreeSet::new(),
            BTreeSet::from([0]),
            BTreeSet::from([1]),
            BTreeSet::new(),
        ];
        // t1 truck, v1 vehicle, l1 location, x declared both truck and location
        let constants = vec![
            BTreeSet::from([2]),
            BTreeSet::from([1]),
            BTreeSet::from([3]),
            BTreeSet::from([2, 3]),
        ];
        TypeHierarchy::new(&parents, constants)
    }

    #[test]
    fn closure_is_transitive() {
        let hierarchy = hierarchy();
        assert!(hierarchy.is_subtype(2, 0));
        assert!(hierarchy.is_subtype(2, 1));
        assert!(hierarchy.is_subtype(3, 0));
        assert!(!hierarchy.is_subtype(1, 2));
        assert_eq!(hierarchy.subtypes(1), vec![1, 2]);
    }

    #[test]
    fn constants_are_collected_through_subtypes() {
        let hierarchy = hierarchy();
        assert_eq!(hierarchy.constants_of_type(1), &[0, 1, 3]);
        assert_eq!(hierarchy.constants_of_type(3), &[2, 3]);
        assert_eq!(hierarchy.constants_of_type(0), &[0, 1, 2, 3]);
        assert_eq!(hierarchy.constants_of_types(&[2, 3]), vec![0, 2, 3]);
        assert!(hierarchy.constant_has_type(3, &[1]));
        assert!(!hierarchy.constant_has_type(2, &[1]));
    }

    #[test]
    fn bindings_enumerate_admissible_constants() {
        use crate::search::Parameter;
        let hierarchy = hierarchy();
        let parameters = Parameters::new(vec![Parameter::new(7, vec![2]), Parameter::new(8, vec![3])]);
        assert_eq!(
            hierarchy.bindings(&parameters),
            vec![
                vec![(7, 0), (8, 2)],
                vec![(7, 0), (8, 3)],
                vec![(7, 3), (8, 2)],
                vec![(7, 3), (8, 3)],
            ]
        );
        assert_eq!(hierarchy.bindings(&Parameters::empty()), vec![Vec::<(VariableId, ConstantId)>::new()]);
    }

    #[test]
    fn adding_a_constant_unions_its_types() {
        let mut hierarchy = hierarchy();
        hierarchy.add_constant(1, &BTreeSet::from([3]));
        assert_eq!(hierarchy.constant_types(1), &BTreeSet::from([1, 3]));
        assert_eq!(hierarchy.constants_of_type(3), &[1, 2, 3]);

        hierarchy.add_constant(4, &BTreeSet::from([2]));
        assert_eq!(hierarchy.constants_of_type(1), &[0, 1, 3, 4]);
        assert!(hierarchy.constant_has_type(4, &[2]));
    }
}

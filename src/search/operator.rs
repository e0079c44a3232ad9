use crate::parsed_types::Name;
use crate::search::cnf::ConditionsCnf;
use crate::search::effects::{
    Effect, EffectsApplier, EffectsResultAtomsCollector, PreprocessedEffects,
};
use crate::search::evaluation::{numeric_lookup, EvaluationManager};
use crate::search::grounding::Ground;
use crate::search::{
    Conditions, ConstantId, Expression, IdManagers, NumericExpression, Parameters, State, Substitution,
    TypeHierarchy, VariableId,
};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use tracing::debug;

/// An action of the domain with its preconditions in both tree and CNF form.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftedOperator {
    pub name: Name,
    pub parameters: Parameters,
    pub preconditions: Conditions,
    pub preconditions_cnf: ConditionsCnf,
    pub effects: PreprocessedEffects,
    /// `None` for unit cost.
    pub cost: Option<NumericExpression>,
    /// Every variable id occurring in the operator.
    pub variables: BTreeSet<VariableId>,
}

impl LiftedOperator {
    pub fn new(
        name: Name,
        parameters: Parameters,
        preconditions: Conditions,
        effects: &[Effect],
        cost: Option<NumericExpression>,
        hierarchy: &TypeHierarchy,
    ) -> Self {
        let preconditions_cnf = ConditionsCnf::from_conditions(&preconditions, hierarchy);
        let effects = PreprocessedEffects::new(effects);

        let mut variables: BTreeSet<VariableId> = parameters.variable_ids().collect();
        variables.extend(preconditions.to_expression().free_variables());
        variables.extend(preconditions_cnf.parameters().variable_ids());
        collect_bound_variables(&preconditions.to_expression(), &mut variables);
        effects.collect_variables(&mut variables);
        if let Some(cost) = &cost {
            cost.collect_variables(&mut variables);
        }

        Self {
            name,
            parameters,
            preconditions,
            preconditions_cnf,
            effects,
            cost,
            variables,
        }
    }

    /// The operator with its delete effects ignored.
    pub fn delete_relaxed(&self) -> Self {
        Self {
            effects: self.effects.with_delete_relaxation(),
            ..self.clone()
        }
    }

    pub fn max_variable_id(&self) -> Option<VariableId> {
        self.variables.last().copied()
    }
}

fn collect_bound_variables(expression: &Expression, variables: &mut BTreeSet<VariableId>) {
    match expression {
        Expression::And(values) | Expression::Or(values) => {
            for value in values {
                collect_bound_variables(value, variables);
            }
        }
        Expression::Not(value) => collect_bound_variables(value, variables),
        Expression::Imply(a, b) => {
            collect_bound_variables(a, variables);
            collect_bound_variables(b, variables);
        }
        Expression::Exists(parameters, value) | Expression::ForAll(parameters, value) => {
            variables.extend(parameters.variable_ids());
            collect_bound_variables(value, variables);
        }
        _ => {}
    }
}

/// A lifted operator with a (possibly partial) assignment of its parameters.
#[derive(Debug, Clone)]
pub struct Operator {
    lifted: Rc<LiftedOperator>,
    substitution: Substitution,
}

impl Operator {
    pub fn new(lifted: Rc<LiftedOperator>, substitution: Substitution) -> Self {
        Self {
            lifted,
            substitution,
        }
    }

    pub fn lifted(&self) -> &LiftedOperator {
        &self.lifted
    }

    pub fn lifted_rc(&self) -> &Rc<LiftedOperator> {
        &self.lifted
    }

    pub fn substitution(&self) -> &Substitution {
        &self.substitution
    }

    pub fn name(&self) -> Name {
        self.lifted.name
    }

    pub fn is_grounded(&self) -> bool {
        self.lifted
            .parameters
            .variable_ids()
            .all(|v| self.substitution.contains(v))
    }

    /// Whether some assignment of the open parameters satisfies the
    /// preconditions in `state`.
    pub fn is_applicable(&self, state: &State, evaluation: &EvaluationManager) -> bool {
        evaluation.evaluate_cnf(&self.lifted.preconditions_cnf, state, &self.substitution)
    }

    /// The successor of `state`. The operator must be grounded.
    pub fn apply(&self, state: &State, evaluation: &EvaluationManager) -> State {
        let result = EffectsResultAtomsCollector::collect(
            &self.lifted.effects,
            &self.substitution,
            state,
            evaluation,
        );
        EffectsApplier::apply(&result, state)
    }

    /// The cost of applying the operator in `state`; 1 for operators without
    /// a cost expression. A cost expression reading a function the state
    /// leaves undefined also falls back to unit cost, so that the plan is
    /// still costed the way a domain without action costs would be.
    pub fn cost(&self, state: &State) -> f64 {
        let Some(cost) = &self.lifted.cost else {
            return 1.0;
        };
        match cost
            .ground(&self.substitution)
            .evaluate(&numeric_lookup(state, &self.substitution))
        {
            Some(value) => value,
            None => {
                debug!(operator = %self.lifted.name, "cost is undefined, using unit cost");
                1.0
            }
        }
    }

    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        let mut parts = vec![self.lifted.name.to_string()];
        for variable in self.lifted.parameters.variable_ids() {
            parts.push(match self.substitution.value(variable) {
                Some(constant) => symbols.constants.name(constant).to_string(),
                None => symbols.variable_name(variable),
            });
        }
        format!("({})", parts.join(" "))
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.lifted, &other.lifted) && self.substitution == other.substitution
    }
}

impl Eq for Operator {}

impl Hash for Operator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.lifted).hash(state);
        self.substitution.hash(state);
    }
}

/// Enumerates the assignments of a parameter list that extend a fixed
/// partial substitution, as a mixed-radix counter over the admissible
/// constants of each open parameter. The last parameter varies fastest.
#[derive(Debug, Clone)]
pub struct SubstitutionsGenerator {
    fixed: Substitution,
    variables: SmallVec<[VariableId; 4]>,
    domains: SmallVec<[Vec<ConstantId>; 4]>,
    position: usize,
    len: usize,
}

impl SubstitutionsGenerator {
    pub fn new(parameters: &Parameters, fixed: &Substitution, hierarchy: &TypeHierarchy) -> Self {
        let mut variables = SmallVec::new();
        let mut domains = SmallVec::new();
        let mut consistent = true;
        for parameter in parameters.iter() {
            match fixed.value(parameter.variable_id) {
                Some(constant) => {
                    consistent &= hierarchy.constant_has_type(constant, &parameter.type_ids);
                }
                None => {
                    variables.push(parameter.variable_id);
                    domains.push(hierarchy.constants_of_types(&parameter.type_ids));
                }
            }
        }
        let len = if consistent {
            domains.iter().map(|d: &Vec<ConstantId>| d.len()).product()
        } else {
            0
        };
        Self {
            fixed: fixed.clone(),
            variables,
            domains,
            position: 0,
            len,
        }
    }

    /// Total number of assignments.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the next assignment to be generated.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn skip_to(&mut self, position: usize) {
        self.position = position.min(self.len);
    }

    /// The assignment at `position`, which must be below [`Self::len`].
    pub fn at(&self, position: usize) -> Substitution {
        debug_assert!(position < self.len);
        let mut substitution = self.fixed.clone();
        let mut rest = position;
        for (variable, domain) in self.variables.iter().zip(&self.domains).rev() {
            substitution.add(*variable, domain[rest % domain.len()]);
            rest /= domain.len();
        }
        substitution
    }
}

impl Iterator for SubstitutionsGenerator {
    type Item = Substitution;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.len {
            return None;
        }
        let substitution = self.at(self.position);
        self.position += 1;
        Some(substitution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Parameter;

    fn hierarchy() -> TypeHierarchy {
        // type 1 holds constants 0 and 1, type 2 holds constants 2, 3 and 4
        TypeHierarchy::new(
            &[BTreeSet::new(), BTreeSet::new(), BTreeSet::new()],
            vec![
                BTreeSet::from([1]),
                BTreeSet::from([1]),
                BTreeSet::from([2]),
                BTreeSet::from([2]),
                BTreeSet::from([2]),
            ],
        )
    }

    fn parameters() -> Parameters {
        Parameters::new(vec![Parameter::new(0, vec![1]), Parameter::new(1, vec![2])])
    }

    #[test]
    fn generator_enumerates_in_lexicographic_order() {
        let generator = SubstitutionsGenerator::new(&parameters(), &Substitution::new(), &hierarchy());
        assert_eq!(generator.len(), 6);
        let all: Vec<(Option<ConstantId>, Option<ConstantId>)> = generator
            .map(|s| (s.value(0), s.value(1)))
            .collect();
        assert_eq!(all[0], (Some(0), Some(2)));
        assert_eq!(all[1], (Some(0), Some(3)));
        assert_eq!(all[3], (Some(1), Some(2)));
        assert_eq!(all[5], (Some(1), Some(4)));
    }

    #[test]
    fn generator_respects_fixed_bindings() {
        let fixed: Substitution = [(1, 3)].into_iter().collect();
        let generator = SubstitutionsGenerator::new(&parameters(), &fixed, &hierarchy());
        assert_eq!(generator.len(), 2);
        assert!(generator.clone().all(|s| s.value(1) == Some(3)));

        let wrong_type: Substitution = [(1, 0)].into_iter().collect();
        assert!(SubstitutionsGenerator::new(&parameters(), &wrong_type, &hierarchy()).is_empty());
    }

    #[test]
    fn generator_resumes_from_position() {
        let mut generator =
            SubstitutionsGenerator::new(&parameters(), &Substitution::new(), &hierarchy());
        generator.next();
        generator.next();
        assert_eq!(generator.position(), 2);
        let rest: Vec<Substitution> = generator.clone().collect();
        assert_eq!(rest.len(), 4);
        generator.skip_to(5);
        assert_eq!(generator.next().map(|s| s.value(1)), Some(Some(4)));
        assert_eq!(generator.next(), None);
    }
}

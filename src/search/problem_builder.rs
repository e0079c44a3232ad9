use crate::parsed_types::{
    self as parsed, ActionDefinition, AssignOperation, BinaryComparison, Domain, EffectDefinition,
    FluentExpression, GoalDefinition, InitElement, Name, Optimization, Requirement, Type,
    TypedVariables, TYPE_OBJECT,
};
use crate::search::effects::{Effect, PrimitiveEffect};
use crate::search::evaluation::RigidRelations;
use crate::search::{
    Atom, Comparison, Conditions, ConstantId, Expression, FunctionId, IdManagers, LiftedOperator,
    NumericExpression, Parameter, Parameters, PredicateId, PrimitivesFactory, Signature, State,
    Term, TypeHierarchy, TypeId, VariableId, OBJECT_TYPE_ID,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;
use tracing::info;

const TOTAL_COST: &str = "total-cost";

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },
    #[error("problem is defined for domain {problem} but the domain is {domain}")]
    DomainMismatch { domain: Name, problem: Name },
    #[error("unknown type {0}")]
    UnknownType(Name),
    #[error("unknown predicate {name} with {arity} arguments")]
    UnknownPredicate { name: Name, arity: usize },
    #[error("unknown function {name} with {arity} arguments")]
    UnknownFunction { name: Name, arity: usize },
    #[error("unknown constant {0}")]
    UnknownConstant(Name),
    #[error("unknown variable ?{0}")]
    UnknownVariable(Name),
    #[error("requirement {0} is not supported")]
    UnsupportedRequirement(Requirement),
    #[error("unsupported construct: {0}")]
    Unsupported(String),
    #[error("inconsistent facts at {0}")]
    Inconsistent(String),
}

/// Everything a problem is made of once the parsed domain and problem have
/// been translated to ids.
#[derive(Debug)]
pub struct ProblemParts {
    pub domain_name: Name,
    pub problem_name: Name,
    pub symbols: Rc<IdManagers>,
    pub hierarchy: Rc<TypeHierarchy>,
    pub operators: Vec<Rc<LiftedOperator>>,
    pub initial_state: State,
    pub goal: Expression,
    pub rigid_predicates: BTreeSet<PredicateId>,
    pub static_functions: BTreeSet<FunctionId>,
}

/// Translates a parsed domain and problem in a single pass: types, then
/// constants, then predicate and function signatures, then operators, the
/// initial state and the goal.
#[derive(Debug)]
pub struct ProblemBuilder<'a> {
    domain: &'a Domain,
    problem: &'a parsed::Problem,
    symbols: IdManagers,
    parents: Vec<BTreeSet<TypeId>>,
    constant_types: Vec<BTreeSet<TypeId>>,
    hierarchy: TypeHierarchy,
    scopes: Vec<Vec<(Name, VariableId)>>,
    total_cost: Option<FunctionId>,
}

impl<'a> ProblemBuilder<'a> {
    pub fn new(domain: &'a Domain, problem: &'a parsed::Problem) -> Self {
        Self {
            domain,
            problem,
            symbols: IdManagers::default(),
            parents: vec![],
            constant_types: vec![],
            hierarchy: TypeHierarchy::default(),
            scopes: vec![],
            total_cost: None,
        }
    }

    pub fn build(mut self) -> Result<ProblemParts, ProblemError> {
        if self.domain.name() != self.problem.domain() {
            return Err(ProblemError::DomainMismatch {
                domain: *self.domain.name(),
                problem: *self.problem.domain(),
            });
        }
        let requirement = self
            .domain
            .requirements()
            .unsupported()
            .chain(self.problem.requirements().unsupported())
            .next();
        if let Some(&requirement) = requirement {
            return Err(ProblemError::UnsupportedRequirement(requirement));
        }

        self.register_types();
        self.register_constants()?;
        self.hierarchy = TypeHierarchy::new(&self.parents, self.constant_types.clone());
        self.register_predicates()?;
        self.register_functions()?;
        self.total_cost = self.metric_total_cost();

        let domain = self.domain;
        let mut operators = Vec::with_capacity(domain.actions().len());
        for action in domain.actions() {
            operators.push(Rc::new(self.build_operator(action)?));
        }
        let problem = self.problem;
        let goal = self.build_goal(problem.goal())?;
        let initial_state = self.build_initial_state()?;

        let mut rigid_predicates: BTreeSet<PredicateId> = (0..self.symbols.predicates.len()).collect();
        let mut static_functions: BTreeSet<FunctionId> = (0..self.symbols.functions.len()).collect();
        for operator in &operators {
            for entry in operator.effects.entries() {
                match &entry.primitive {
                    PrimitiveEffect::Add(atom) | PrimitiveEffect::Delete(atom) => {
                        rigid_predicates.remove(&atom.name_id);
                    }
                    PrimitiveEffect::NumericAssign { function, .. }
                    | PrimitiveEffect::ObjectAssign { function, .. } => {
                        static_functions.remove(&function.name_id);
                    }
                }
            }
        }

        info!(
            types = self.symbols.types.len(),
            constants = self.symbols.constants.len(),
            predicates = self.symbols.predicates.len(),
            functions = self.symbols.functions.len(),
            operators = operators.len(),
            rigid_predicates = rigid_predicates.len(),
            static_functions = static_functions.len(),
            "built problem"
        );

        Ok(ProblemParts {
            domain_name: *self.domain.name(),
            problem_name: *self.problem.name(),
            symbols: Rc::new(self.symbols),
            hierarchy: Rc::new(self.hierarchy),
            operators,
            initial_state,
            goal,
            rigid_predicates,
            static_functions,
        })
    }

    /// Rigid atoms of a state: its atoms over rigid predicates.
    pub fn rigid_relations(
        state: &State,
        rigid_predicates: &BTreeSet<PredicateId>,
        static_functions: &BTreeSet<FunctionId>,
    ) -> RigidRelations {
        let atoms = state
            .predicates()
            .iter()
            .filter(|atom| rigid_predicates.contains(&atom.name_id))
            .cloned()
            .collect();
        RigidRelations::new(rigid_predicates.clone(), atoms, static_functions.clone())
    }

    fn register_types(&mut self) {
        self.register_type(Name::new(TYPE_OBJECT));
        let domain = self.domain;
        for typed in domain.types().iter() {
            let type_id = self.register_type(*typed.value());
            for parent in typed.type_().primitives() {
                let parent_id = self.register_type(*parent.name());
                if parent_id != type_id {
                    self.parents[type_id].insert(parent_id);
                }
            }
        }
    }

    fn register_type(&mut self, name: Name) -> TypeId {
        let id = self.symbols.types.register(name, 0);
        if id == self.parents.len() {
            self.parents.push(BTreeSet::new());
        }
        id
    }

    /// Constants of the domain and objects of the problem. A name declared
    /// more than once gets the union of its types.
    fn register_constants(&mut self) -> Result<(), ProblemError> {
        let (domain, problem) = (self.domain, self.problem);
        let declarations = domain.constants().iter().chain(problem.objects().iter());
        for typed in declarations {
            let types: BTreeSet<TypeId> = self.type_ids(typed.type_())?.into_iter().collect();
            let id = self.symbols.constants.register(*typed.value(), 0);
            if id == self.constant_types.len() {
                self.constant_types.push(BTreeSet::new());
            }
            self.constant_types[id].extend(types);
        }
        Ok(())
    }

    fn register_predicates(&mut self) -> Result<(), ProblemError> {
        for predicate in self.domain.predicates() {
            let signature = Signature {
                arguments: self.argument_types(predicate.variables())?,
                return_types: None,
            };
            self.symbols.register_predicate(*predicate.name(), signature);
        }
        Ok(())
    }

    fn register_functions(&mut self) -> Result<(), ProblemError> {
        for function in self.domain.functions() {
            let return_types = if function.is_numeric() {
                None
            } else {
                Some(self.type_ids(function.return_type())?)
            };
            let signature = Signature {
                arguments: self.argument_types(function.variables())?,
                return_types,
            };
            self.symbols.register_function(*function.name(), signature);
        }
        Ok(())
    }

    /// The `total-cost` function, when the metric minimises it.
    fn metric_total_cost(&self) -> Option<FunctionId> {
        let metric = self.problem.metric()?;
        if metric.optimization() != Optimization::Minimize {
            return None;
        }
        match metric.expression() {
            FluentExpression::Term(parsed::Term::Function(atom))
                if atom.name() == TOTAL_COST && atom.is_empty() =>
            {
                self.symbols.functions.get_id(atom.name(), 0)
            }
            _ => None,
        }
    }

    fn type_ids(&self, r#type: &Type) -> Result<Vec<TypeId>, ProblemError> {
        r#type
            .primitives()
            .iter()
            .map(|primitive| {
                self.symbols
                    .types
                    .get_id(primitive.name(), 0)
                    .ok_or(ProblemError::UnknownType(*primitive.name()))
            })
            .collect()
    }

    fn argument_types(&self, variables: &TypedVariables) -> Result<Vec<Vec<TypeId>>, ProblemError> {
        variables
            .iter()
            .map(|typed| self.type_ids(typed.type_()))
            .collect()
    }

    /// Opens a scope with a fresh variable for each declared variable.
    fn push_scope(&mut self, variables: &TypedVariables) -> Result<Parameters, ProblemError> {
        let mut scope = vec![];
        let mut parameters = vec![];
        for typed in variables.iter() {
            let name = *typed.value().name();
            let type_ids = self.type_ids(typed.type_())?;
            let id = self.symbols.variables.register_fresh(name);
            scope.push((name, id));
            parameters.push(Parameter::new(id, type_ids));
        }
        self.scopes.push(scope);
        Ok(Parameters::new(parameters))
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn variable(&self, name: &Name) -> Result<VariableId, ProblemError> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter().rev())
            .find(|(declared, _)| declared == name)
            .map(|&(_, id)| id)
            .ok_or(ProblemError::UnknownVariable(*name))
    }

    fn constant(&self, name: &Name) -> Result<ConstantId, ProblemError> {
        self.symbols
            .constants
            .get_id(name, 0)
            .ok_or(ProblemError::UnknownConstant(*name))
    }

    fn build_operator(&mut self, action: &ActionDefinition) -> Result<LiftedOperator, ProblemError> {
        let parameters = self.push_scope(action.parameters())?;
        let body = self.build_action_body(action);
        self.pop_scope();
        let (precondition, effects, cost) = body?;

        Ok(LiftedOperator::new(
            *action.name(),
            parameters.clone(),
            Conditions::new(parameters, vec![precondition]),
            &effects,
            cost,
            &self.hierarchy,
        ))
    }

    #[allow(clippy::type_complexity)]
    fn build_action_body(
        &mut self,
        action: &ActionDefinition,
    ) -> Result<(Expression, Vec<Effect>, Option<NumericExpression>), ProblemError> {
        let precondition = self.build_goal(action.precondition())?;
        let mut cost = None;
        let mut effects = vec![];
        for effect in action.effects() {
            if let Some(expression) = self.cost_increase(effect)? {
                cost = Some(expression);
                continue;
            }
            effects.extend(self.build_effect(effect)?);
        }
        Ok((precondition, effects, cost))
    }

    /// The cost expression of `(increase (total-cost) e)` when costs come
    /// from the metric.
    fn cost_increase(
        &self,
        effect: &EffectDefinition,
    ) -> Result<Option<NumericExpression>, ProblemError> {
        let Some(total_cost) = self.total_cost else {
            return Ok(None);
        };
        match effect {
            EffectDefinition::Assign(AssignOperation::Increase, function, value)
                if self.symbols.functions.get_id(function.name(), function.len())
                    == Some(total_cost) =>
            {
                Ok(Some(self.build_numeric(value)?))
            }
            _ => Ok(None),
        }
    }

    fn build_goal(&mut self, goal: &GoalDefinition) -> Result<Expression, ProblemError> {
        Ok(match goal {
            GoalDefinition::Atom(atom) => Expression::Predicate(self.build_predicate_atom(atom)?),
            GoalDefinition::And(values) => Expression::And(
                values
                    .iter()
                    .map(|value| self.build_goal(value))
                    .collect::<Result<_, _>>()?,
            ),
            GoalDefinition::Or(values) => Expression::Or(
                values
                    .iter()
                    .map(|value| self.build_goal(value))
                    .collect::<Result<_, _>>()?,
            ),
            GoalDefinition::Not(value) => Expression::Not(Box::new(self.build_goal(value)?)),
            GoalDefinition::Imply(a, b) => {
                Expression::Imply(Box::new(self.build_goal(a)?), Box::new(self.build_goal(b)?))
            }
            GoalDefinition::Exists(variables, value) => {
                let parameters = self.push_scope(variables)?;
                let value = self.build_goal(value);
                self.pop_scope();
                Expression::Exists(parameters, Box::new(value?))
            }
            GoalDefinition::ForAll(variables, value) => {
                let parameters = self.push_scope(variables)?;
                let value = self.build_goal(value);
                self.pop_scope();
                Expression::ForAll(parameters, Box::new(value?))
            }
            GoalDefinition::Compare(comparison, a, b) => self.build_comparison(*comparison, a, b)?,
        })
    }

    /// Equality between object terms, or a numeric comparison.
    fn build_comparison(
        &self,
        comparison: BinaryComparison,
        a: &FluentExpression,
        b: &FluentExpression,
    ) -> Result<Expression, ProblemError> {
        match (self.object_term(a)?, self.object_term(b)?) {
            (Some(a), Some(b)) if comparison == BinaryComparison::Equals => {
                Ok(Expression::Equals(self.build_term(a)?, self.build_term(b)?))
            }
            (None, None) => Ok(Expression::NumericCompare(
                Comparison::from(comparison),
                self.build_numeric(a)?,
                self.build_numeric(b)?,
            )),
            _ => Err(ProblemError::Unsupported(format!(
                "comparison {} between object and numeric values",
                comparison
            ))),
        }
    }

    /// The term of an object-valued expression, `None` for numeric ones.
    fn object_term<'e>(
        &self,
        expression: &'e FluentExpression,
    ) -> Result<Option<&'e parsed::Term>, ProblemError> {
        match expression {
            FluentExpression::Term(term @ parsed::Term::Function(atom)) => {
                if self.symbols.is_object_function(self.function_id(atom)?) {
                    Ok(Some(term))
                } else {
                    Ok(None)
                }
            }
            FluentExpression::Term(term) => Ok(Some(term)),
            _ => Ok(None),
        }
    }

    fn function_id(&self, atom: &parsed::Atom<parsed::Term>) -> Result<FunctionId, ProblemError> {
        self.symbols
            .functions
            .get_id(atom.name(), atom.len())
            .ok_or(ProblemError::UnknownFunction {
                name: *atom.name(),
                arity: atom.len(),
            })
    }

    fn build_term(&self, term: &parsed::Term) -> Result<Term, ProblemError> {
        match term {
            parsed::Term::Name(name) => Ok(Term::Constant(self.constant(name)?)),
            parsed::Term::Variable(variable) => Ok(Term::Variable(self.variable(variable.name())?)),
            parsed::Term::Function(atom) => {
                let function = self.function_id(atom)?;
                if !self.symbols.is_object_function(function) {
                    return Err(ProblemError::Unsupported(format!(
                        "numeric function {} used as an object",
                        atom.name()
                    )));
                }
                Ok(Term::ObjectFunction(Atom::new(function, self.build_terms(atom)?)))
            }
        }
    }

    fn build_terms(&self, atom: &parsed::Atom<parsed::Term>) -> Result<Vec<Term>, ProblemError> {
        atom.iter().map(|term| self.build_term(term)).collect()
    }

    fn build_predicate_atom(&self, atom: &parsed::Atom<parsed::Term>) -> Result<Atom, ProblemError> {
        let predicate = self
            .symbols
            .predicates
            .get_id(atom.name(), atom.len())
            .ok_or(ProblemError::UnknownPredicate {
                name: *atom.name(),
                arity: atom.len(),
            })?;
        Ok(Atom::new(predicate, self.build_terms(atom)?))
    }

    fn build_function_atom(&self, atom: &parsed::Atom<parsed::Term>) -> Result<Atom, ProblemError> {
        Ok(Atom::new(self.function_id(atom)?, self.build_terms(atom)?))
    }

    fn build_numeric(&self, expression: &FluentExpression) -> Result<NumericExpression, ProblemError> {
        Ok(match expression {
            FluentExpression::Number(value) => NumericExpression::number(*value),
            FluentExpression::Term(parsed::Term::Function(atom)) => {
                let function = self.build_function_atom(atom)?;
                if self.symbols.is_object_function(function.name_id) {
                    return Err(ProblemError::Unsupported(format!(
                        "object function {} used as a number",
                        atom.name()
                    )));
                }
                NumericExpression::Function(function)
            }
            FluentExpression::Term(_) => {
                return Err(ProblemError::Unsupported(
                    "object term in a numeric expression".to_string(),
                ))
            }
            FluentExpression::Plus(values) => NumericExpression::Plus(
                values
                    .iter()
                    .map(|value| self.build_numeric(value))
                    .collect::<Result<_, _>>()?,
            ),
            FluentExpression::Multiply(values) => NumericExpression::Multiply(
                values
                    .iter()
                    .map(|value| self.build_numeric(value))
                    .collect::<Result<_, _>>()?,
            ),
            FluentExpression::Minus(a, b) => NumericExpression::Minus(
                Box::new(self.build_numeric(a)?),
                Box::new(self.build_numeric(b)?),
            ),
            FluentExpression::Divide(a, b) => NumericExpression::Divide(
                Box::new(self.build_numeric(a)?),
                Box::new(self.build_numeric(b)?),
            ),
            FluentExpression::Negate(value) => {
                NumericExpression::UnaryMinus(Box::new(self.build_numeric(value)?))
            }
        })
    }

    fn build_effect(&mut self, effect: &EffectDefinition) -> Result<Vec<Effect>, ProblemError> {
        Ok(match effect {
            EffectDefinition::Add(atom) => vec![Effect::Primitive(PrimitiveEffect::Add(
                self.build_predicate_atom(atom)?,
            ))],
            EffectDefinition::Delete(atom) => vec![Effect::Primitive(PrimitiveEffect::Delete(
                self.build_predicate_atom(atom)?,
            ))],
            EffectDefinition::Assign(operation, function, value) => {
                vec![Effect::Primitive(self.build_assignment(*operation, function, value)?)]
            }
            EffectDefinition::When(condition, effects) => {
                let condition = self.build_goal(condition)?;
                conditional(condition, self.build_effects(effects)?)
            }
            EffectDefinition::ForAll(variables, effects) => {
                let parameters = self.push_scope(variables)?;
                let body = self.build_effects(effects);
                self.pop_scope();
                vec![Effect::ForAll(parameters, body?)]
            }
        })
    }

    fn build_effects(&mut self, effects: &[EffectDefinition]) -> Result<Vec<Effect>, ProblemError> {
        let mut result = vec![];
        for effect in effects {
            result.extend(self.build_effect(effect)?);
        }
        Ok(result)
    }

    fn build_assignment(
        &self,
        operation: AssignOperation,
        function: &parsed::Atom<parsed::Term>,
        value: &FluentExpression,
    ) -> Result<PrimitiveEffect, ProblemError> {
        let function = self.build_function_atom(function)?;
        if !self.symbols.is_object_function(function.name_id) {
            return Ok(PrimitiveEffect::NumericAssign {
                operator: operation.into(),
                function,
                value: self.build_numeric(value)?,
            });
        }
        match (operation, value.as_term()) {
            (AssignOperation::Assign, Some(term)) => Ok(PrimitiveEffect::ObjectAssign {
                function,
                value: self.build_term(term)?,
            }),
            _ => Err(ProblemError::Unsupported(format!(
                "{} of an object function",
                operation
            ))),
        }
    }

    fn build_initial_state(&self) -> Result<State, ProblemError> {
        let factory = PrimitivesFactory::new(&self.symbols);
        let mut predicates = BTreeSet::new();
        let mut numeric = BTreeMap::new();
        let mut objects = BTreeMap::new();
        for element in self.problem.init() {
            if let (Some(total_cost), InitElement::NumericAssign(function, _)) =
                (self.total_cost, element)
            {
                if self.symbols.functions.get_id(function.name(), function.len()) == Some(total_cost)
                {
                    continue;
                }
            }
            factory.add_init_element(element, &mut predicates, &mut numeric, &mut objects)?;
        }
        Ok(State::new(predicates, numeric, objects))
    }
}

/// Puts effects under a condition. Nested conditions are conjoined and
/// quantified effects keep their scope around the condition.
fn conditional(condition: Expression, effects: Vec<Effect>) -> Vec<Effect> {
    let mut primitives = vec![];
    let mut result = vec![];
    for effect in effects {
        match effect {
            Effect::Primitive(primitive) => primitives.push(primitive),
            Effect::When(inner, nested) => result.push(Effect::When(
                Expression::and([condition.clone(), inner]),
                nested,
            )),
            Effect::ForAll(parameters, nested) => result.push(Effect::ForAll(
                parameters,
                conditional(condition.clone(), nested),
            )),
        }
    }
    if !primitives.is_empty() {
        result.insert(0, Effect::When(condition, primitives));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::Parser;
    use crate::test_utils::*;

    fn build(domain: &str, problem: &str) -> Result<ProblemParts, ProblemError> {
        let domain = Domain::from_str(domain).unwrap();
        let problem = parsed::Problem::from_str(problem).unwrap();
        ProblemBuilder::new(&domain, &problem).build()
    }

    #[test]
    fn blocksworld_symbols() {
        let parts = build(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        assert_eq!(parts.symbols.predicates.len(), 5);
        assert_eq!(parts.symbols.constants.len(), 4);
        assert_eq!(parts.operators.len(), 4);
        assert!(parts.rigid_predicates.is_empty());
        assert_eq!(parts.initial_state.predicates().len(), 7);
    }

    #[test]
    fn total_cost_becomes_operator_cost() {
        let parts = build(COUNTERS_DOMAIN_TEXT, COUNTERS_PROBLEM_TEXT).unwrap();
        let total_cost = parts
            .symbols
            .functions
            .get_id(&Name::new(TOTAL_COST), 0)
            .unwrap();
        assert!(parts.operators.iter().all(|op| op.cost.is_some()));
        assert!(parts.operators.iter().all(|op| op
            .effects
            .entries()
            .iter()
            .all(|entry| entry.primitive.target().name_id != total_cost)));
        assert!(parts
            .initial_state
            .numeric_values()
            .all(|(atom, _)| atom.name_id != total_cost));
    }

    #[test]
    fn rigid_predicates_and_static_functions() {
        let parts = build(DELIVERY_DOMAIN_TEXT, DELIVERY_PROBLEM_TEXT).unwrap();
        let road = parts.symbols.predicates.get_id(&Name::new("road"), 2).unwrap();
        let at = parts.symbols.functions.get_id(&Name::new("at"), 1).unwrap();
        let capacity = parts
            .symbols
            .functions
            .get_id(&Name::new("capacity"), 1)
            .unwrap();
        assert!(parts.rigid_predicates.contains(&road));
        assert!(parts.static_functions.contains(&capacity));
        assert!(!parts.static_functions.contains(&at));
        assert!(parts.symbols.is_object_function(at));
    }

    #[test]
    fn subtypes_admit_constants() {
        let parts = build(DELIVERY_DOMAIN_TEXT, DELIVERY_PROBLEM_TEXT).unwrap();
        let locatable = parts.symbols.types.get_id(&Name::new("locatable"), 0).unwrap();
        let truck = parts.symbols.types.get_id(&Name::new("truck"), 0).unwrap();
        assert!(parts.hierarchy.is_subtype(truck, locatable));
        assert!(parts.hierarchy.is_subtype(truck, OBJECT_TYPE_ID));
        assert_eq!(parts.hierarchy.constants_of_types(&[locatable]).len(), 3);
    }

    #[test]
    fn mismatched_domain_is_rejected() {
        let problem = BLOCKSWORLD_PROBLEM13_TEXT.replace("(:domain blocksworld)", "(:domain other)");
        assert!(matches!(
            build(BLOCKSWORLD_DOMAIN_TEXT, &problem),
            Err(ProblemError::DomainMismatch { .. })
        ));
    }

    #[test]
    fn unknown_predicate_is_reported() {
        let problem = BLOCKSWORLD_PROBLEM13_TEXT.replace("(clear c)", "(clean c)");
        let error = build(BLOCKSWORLD_DOMAIN_TEXT, &problem).unwrap_err();
        assert!(matches!(error, ProblemError::UnknownPredicate { arity: 1, .. }));
        assert_eq!(error.to_string(), "unknown predicate clean with 1 arguments");
    }

    #[test]
    fn nested_conditions_are_conjoined() {
        let effects = conditional(
            Expression::Truth(true),
            vec![
                Effect::Primitive(PrimitiveEffect::Add(Atom::new(0, vec![]))),
                Effect::When(Expression::Truth(false), vec![]),
            ],
        );
        assert_eq!(effects.len(), 2);
        assert!(matches!(&effects[0], Effect::When(Expression::Truth(true), p) if p.len() == 1));
        assert!(matches!(&effects[1], Effect::When(Expression::And(c), _) if c.len() == 2));
    }
}

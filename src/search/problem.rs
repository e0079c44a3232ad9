use crate::parsed_types::{self as parsed, Domain, Name};
use crate::parsers::Parser;
use crate::search::cnf::ConditionsCnf;
use crate::search::effects::{
    EffectsBackwardsConditionsApplier, EffectsBackwardsRelativeStateApplier,
    EffectsRelevanceConditionsEvaluator, EffectsRelevanceRelativeStateEvaluator,
};
use crate::search::evaluation::{EvaluationManager, RigidRelations};
use crate::search::relaxed::RelaxedProblem;
use crate::search::{
    Expression, FunctionId, IdManagers, LiftedOperator, Operator, Parameters, PredicateId,
    PrimitivesFactory, ProblemBuilder, ProblemError, RelativeState, State, StatesEnumerator,
    Substitution, SubstitutionsGenerator, TypeHierarchy, VariableId,
};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, trace};

/// Where an interrupted enumeration resumes: the operator and the position
/// in the substitutions of that operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Position {
    operator: usize,
    substitution: usize,
}

#[derive(Debug, Clone)]
struct Cursor<T> {
    origin: T,
    position: Position,
    seen: HashSet<(usize, Substitution)>,
}

/// A planning problem as seen by search algorithms: an initial state, goal
/// conditions, and the lifted operators connecting them, forwards and
/// backwards.
#[derive(Debug, Clone)]
pub struct Problem {
    domain_name: Name,
    problem_name: Name,
    symbols: Rc<IdManagers>,
    hierarchy: Rc<TypeHierarchy>,
    operators: Vec<Rc<LiftedOperator>>,
    initial_state: Rc<State>,
    goal: ConditionsCnf,
    rigid_predicates: BTreeSet<PredicateId>,
    static_functions: BTreeSet<FunctionId>,
    rigid: Rc<RigidRelations>,
    evaluation: EvaluationManager,
    enumerator: StatesEnumerator,
    first_free_variable: VariableId,
    successors_cursor: Option<Cursor<State>>,
    predecessors_cursor: Option<Cursor<ConditionsCnf>>,
}

impl Problem {
    pub fn from_path(domain_path: &Path, problem_path: &Path) -> Result<Self, ProblemError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|source| ProblemError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        Self::from_text(&read(domain_path)?, &read(problem_path)?)
    }

    pub fn from_text(domain_text: &str, problem_text: &str) -> Result<Self, ProblemError> {
        let domain = Domain::from_str(domain_text).map_err(|e| ProblemError::Parse {
            what: "domain",
            message: e.to_string(),
        })?;
        let problem = parsed::Problem::from_str(problem_text).map_err(|e| ProblemError::Parse {
            what: "problem",
            message: e.to_string(),
        })?;
        Self::from_parsed(&domain, &problem)
    }

    pub fn from_parsed(domain: &Domain, problem: &parsed::Problem) -> Result<Self, ProblemError> {
        let parts = ProblemBuilder::new(domain, problem).build()?;
        let rigid = Rc::new(ProblemBuilder::rigid_relations(
            &parts.initial_state,
            &parts.rigid_predicates,
            &parts.static_functions,
        ));
        let initial_state = Rc::new(parts.initial_state);
        let goal = ConditionsCnf::from_expression(
            &parts.goal,
            Parameters::empty(),
            &parts.hierarchy,
        );
        let first_free_variable = parts.symbols.variables.len();

        Ok(Self {
            domain_name: parts.domain_name,
            problem_name: parts.problem_name,
            evaluation: EvaluationManager::new(parts.hierarchy.clone(), rigid.clone()),
            enumerator: StatesEnumerator::new(
                parts.symbols.clone(),
                parts.hierarchy.clone(),
                rigid.clone(),
                initial_state.clone(),
            ),
            symbols: parts.symbols,
            hierarchy: parts.hierarchy,
            operators: parts.operators,
            initial_state,
            goal,
            rigid_predicates: parts.rigid_predicates,
            static_functions: parts.static_functions,
            rigid,
            first_free_variable,
            successors_cursor: None,
            predecessors_cursor: None,
        })
    }

    pub fn domain_name(&self) -> &Name {
        &self.domain_name
    }

    pub fn problem_name(&self) -> &Name {
        &self.problem_name
    }

    pub fn symbols(&self) -> &IdManagers {
        &self.symbols
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    pub fn operators(&self) -> &[Rc<LiftedOperator>] {
        &self.operators
    }

    pub fn rigid(&self) -> &RigidRelations {
        &self.rigid
    }

    pub fn evaluation(&self) -> &EvaluationManager {
        &self.evaluation
    }

    pub fn enumerator(&self) -> &StatesEnumerator {
        &self.enumerator
    }

    pub fn factory(&self) -> PrimitivesFactory<'_> {
        PrimitivesFactory::new(&self.symbols)
    }

    /// The first variable id no operator or goal uses.
    pub fn first_free_variable(&self) -> VariableId {
        self.first_free_variable
    }

    pub fn get_initial_state(&self) -> &State {
        &self.initial_state
    }

    pub fn goal(&self) -> &ConditionsCnf {
        &self.goal
    }

    pub fn is_goal_state(&self, state: &State) -> bool {
        self.evaluation
            .evaluate_cnf(&self.goal, state, &Substitution::new())
    }

    /// Whether the initial state satisfies the conditions, the goal test of
    /// backward search.
    pub fn is_initial_state_satisfying(&self, conditions: &ConditionsCnf) -> bool {
        self.evaluation
            .evaluate_cnf(conditions, &self.initial_state, &Substitution::new())
    }

    pub fn get_not_accomplished_goals_count(&self, state: &State) -> usize {
        self.evaluation
            .not_accomplished_constraints_count(&self.goal, state)
    }

    /// The clauses of `conditions` the initial state leaves unsatisfied.
    pub fn get_not_accomplished_conditions_count(&self, conditions: &ConditionsCnf) -> usize {
        self.evaluation
            .not_accomplished_constraints_count(conditions, &self.initial_state)
    }

    /// Every applicable grounded operator with the state it leads to, lazily
    /// and in a fixed order.
    pub fn get_successors<'a>(&'a self, state: &'a State) -> Successors<'a> {
        Successors::new(self, state, Position::default())
    }

    /// The next `n` successors of `state`, continuing where the previous call
    /// for the same state stopped. A different state restarts the
    /// enumeration; an exhausted one yields nothing.
    pub fn get_next_successors(&mut self, state: &State, n: usize) -> Vec<(Operator, State)> {
        let position = match &self.successors_cursor {
            Some(cursor) if cursor.origin == *state => cursor.position,
            _ => Position::default(),
        };
        let mut successors = Successors::new(self, state, position);
        let batch: Vec<_> = successors.by_ref().take(n).collect();
        let position = successors.position();
        self.successors_cursor = Some(Cursor {
            origin: state.clone(),
            position,
            seen: HashSet::new(),
        });
        batch
    }

    /// Lifted predecessors of the conditions: every operator with the part
    /// of a grounding it needs to be relevant, and the regressed conditions.
    /// Operators whose regression is contradictory are skipped.
    pub fn get_predecessors<'a>(&'a self, goal: &'a ConditionsCnf) -> Predecessors<'a> {
        Predecessors::new(self, goal, Position::default(), HashSet::new())
    }

    /// The next `n` predecessors of `goal`, continuing where the previous
    /// call for the same conditions stopped.
    pub fn get_next_predecessors(
        &mut self,
        goal: &ConditionsCnf,
        n: usize,
    ) -> Vec<(Operator, ConditionsCnf)> {
        let (position, seen) = match self.predecessors_cursor.take() {
            Some(cursor) if cursor.origin == *goal => (cursor.position, cursor.seen),
            _ => (Position::default(), HashSet::new()),
        };
        let mut predecessors = Predecessors::new(self, goal, position, seen);
        let batch: Vec<_> = predecessors.by_ref().take(n).collect();
        let (position, seen) = predecessors.into_cursor();
        self.predecessors_cursor = Some(Cursor {
            origin: goal.clone(),
            position,
            seen,
        });
        batch
    }

    /// Grounded predecessors of a relative state.
    pub fn get_relative_state_predecessors(
        &self,
        relative: &RelativeState,
    ) -> Vec<(Operator, RelativeState)> {
        let applier = EffectsBackwardsRelativeStateApplier::new(&self.evaluation, &self.enumerator);
        let mut result = vec![];
        for operator in &self.operators {
            let generator =
                SubstitutionsGenerator::new(&operator.parameters, &Substitution::new(), &self.hierarchy);
            for substitution in generator {
                let effects = operator.effects.instantiate(&substitution, &self.hierarchy);
                if !EffectsRelevanceRelativeStateEvaluator::evaluate(&effects, relative, &self.hierarchy)
                    .relevant
                {
                    continue;
                }
                for predecessor in
                    applier.apply(operator, &substitution, relative, self.first_free_variable)
                {
                    result.push((Operator::new(operator.clone(), substitution.clone()), predecessor));
                }
            }
        }
        debug!(predecessors = result.len(), "relative state predecessors");
        result
    }

    /// The states from which some operator leads exactly to `state`.
    pub fn get_state_predecessors(&self, state: &State) -> Vec<(Operator, State)> {
        let mut relative = RelativeState::from(state);
        for atom in self.enumerator.fluent_atoms() {
            if !state.has_predicate(&atom) {
                relative.add_literal(true, atom);
            }
        }
        let mut result = vec![];
        for (operator, predecessor) in self.get_relative_state_predecessors(&relative) {
            for candidate in self.enumerator.enumerate_states(&predecessor) {
                if operator.is_applicable(&candidate, &self.evaluation)
                    && operator.apply(&candidate, &self.evaluation) == *state
                    && !result.contains(&(operator.clone(), candidate.clone()))
                {
                    result.push((operator.clone(), candidate));
                }
            }
        }
        result
    }

    /// The problem with delete effects ignored, grounded.
    pub fn get_relaxed_problem(&self) -> RelaxedProblem {
        RelaxedProblem::new(self)
    }

    /// A copy whose operators ignore their delete effects.
    pub fn delete_relaxed(&self) -> Problem {
        Problem {
            operators: self
                .operators
                .iter()
                .map(|operator| Rc::new(operator.delete_relaxed()))
                .collect(),
            successors_cursor: None,
            predecessors_cursor: None,
            ..self.clone()
        }
    }

    pub fn set_initial_state(&mut self, state: State) {
        self.rigid = Rc::new(ProblemBuilder::rigid_relations(
            &state,
            &self.rigid_predicates,
            &self.static_functions,
        ));
        self.initial_state = Rc::new(state);
        self.evaluation = EvaluationManager::new(self.hierarchy.clone(), self.rigid.clone());
        self.enumerator = StatesEnumerator::new(
            self.symbols.clone(),
            self.hierarchy.clone(),
            self.rigid.clone(),
            self.initial_state.clone(),
        );
        self.successors_cursor = None;
        self.predecessors_cursor = None;
    }

    pub fn set_goal_conditions(&mut self, goal: ConditionsCnf) {
        if let Some(max) = goal.max_variable_id() {
            self.first_free_variable = self.first_free_variable.max(max + 1);
        }
        self.goal = goal;
        self.predecessors_cursor = None;
    }

    /// Converts an expression over the problem's symbols, e.g. a goal.
    pub fn conditions(&self, expression: &Expression) -> ConditionsCnf {
        ConditionsCnf::from_expression(expression, Parameters::empty(), &self.hierarchy)
    }
}

/// Lazy successors of a state.
#[derive(Debug)]
pub struct Successors<'a> {
    problem: &'a Problem,
    state: &'a State,
    operator: usize,
    generator: Option<SubstitutionsGenerator>,
}

impl<'a> Successors<'a> {
    fn new(problem: &'a Problem, state: &'a State, position: Position) -> Self {
        let mut successors = Self {
            problem,
            state,
            operator: position.operator,
            generator: None,
        };
        successors.open(position.substitution);
        successors
    }

    fn open(&mut self, start: usize) {
        self.generator = self.problem.operators.get(self.operator).map(|operator| {
            let mut generator = SubstitutionsGenerator::new(
                &operator.parameters,
                &Substitution::new(),
                &self.problem.hierarchy,
            );
            generator.skip_to(start);
            generator
        });
    }

    fn position(&self) -> Position {
        Position {
            operator: self.operator,
            substitution: self.generator.as_ref().map_or(0, |g| g.position()),
        }
    }
}

impl Iterator for Successors<'_> {
    type Item = (Operator, State);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let generator = self.generator.as_mut()?;
            let Some(substitution) = generator.next() else {
                self.operator += 1;
                self.open(0);
                continue;
            };
            let operator = Operator::new(self.problem.operators[self.operator].clone(), substitution);
            if operator.is_applicable(self.state, &self.problem.evaluation) {
                let successor = operator.apply(self.state, &self.problem.evaluation);
                trace!(operator = %operator.human_readable(&self.problem.symbols), "successor");
                return Some((operator, successor));
            }
        }
    }
}

/// Lazy lifted predecessors of conditions.
#[derive(Debug)]
pub struct Predecessors<'a> {
    problem: &'a Problem,
    goal: &'a ConditionsCnf,
    operator: usize,
    generator: Option<SubstitutionsGenerator>,
    seen: HashSet<(usize, Substitution)>,
}

impl<'a> Predecessors<'a> {
    fn new(
        problem: &'a Problem,
        goal: &'a ConditionsCnf,
        position: Position,
        seen: HashSet<(usize, Substitution)>,
    ) -> Self {
        let mut predecessors = Self {
            problem,
            goal,
            operator: position.operator,
            generator: None,
            seen,
        };
        predecessors.open(position.substitution);
        predecessors
    }

    fn open(&mut self, start: usize) {
        self.generator = self.problem.operators.get(self.operator).map(|operator| {
            let mut generator = SubstitutionsGenerator::new(
                &operator.parameters,
                &Substitution::new(),
                &self.problem.hierarchy,
            );
            generator.skip_to(start);
            generator
        });
    }

    fn into_cursor(self) -> (Position, HashSet<(usize, Substitution)>) {
        let position = Position {
            operator: self.operator,
            substitution: self.generator.as_ref().map_or(0, |g| g.position()),
        };
        (position, self.seen)
    }
}

impl Iterator for Predecessors<'_> {
    type Item = (Operator, ConditionsCnf);

    fn next(&mut self) -> Option<Self::Item> {
        let applier = EffectsBackwardsConditionsApplier::new(&self.problem.evaluation);
        loop {
            let generator = self.generator.as_mut()?;
            let Some(substitution) = generator.next() else {
                self.operator += 1;
                self.open(0);
                continue;
            };
            let operator = &self.problem.operators[self.operator];
            let effects = operator
                .effects
                .instantiate(&substitution, &self.problem.hierarchy);
            if !EffectsRelevanceConditionsEvaluator::evaluate(&effects, self.goal).relevant {
                continue;
            }
            let minimal =
                applier.extract_minimal_operator_substitution(operator, &substitution, self.goal);
            if !self.seen.insert((self.operator, minimal.clone())) {
                continue;
            }
            let regressed = applier.apply(
                operator,
                &minimal,
                self.goal,
                self.problem.first_free_variable,
            );
            if regressed.is_contradictory() {
                continue;
            }
            let operator = Operator::new(operator.clone(), minimal);
            trace!(operator = %operator.human_readable(&self.problem.symbols), "predecessor");
            return Some((operator, regressed));
        }
    }
}

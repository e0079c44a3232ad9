use crate::search::cnf::ConditionsCnf;
use crate::search::heuristics::heuristic::relative_state_conditions;
use crate::search::heuristics::BlindHeuristic;
use crate::search::search_engines::{
    BestFirstSearch, SearchEngine, SearchResult, TerminationCondition,
};
use crate::search::{Heuristic, HeuristicValue, Problem, RelativeState, State};
use ordered_float::Float;
use tracing::debug;

/// h+: the optimal plan cost of the delete relaxation. Each evaluation points
/// a private relaxed copy of the problem at the node and solves it with A*
/// and the blind heuristic.
#[derive(Debug)]
pub struct PerfectRelaxationHeuristic {
    relaxed: Problem,
    initial_state: State,
    goal: ConditionsCnf,
}

impl PerfectRelaxationHeuristic {
    pub fn new(problem: &Problem) -> Self {
        Self {
            relaxed: problem.delete_relaxed(),
            initial_state: problem.get_initial_state().clone(),
            goal: problem.goal().clone(),
        }
    }

    fn solve(&mut self, initial_state: State, goal: ConditionsCnf) -> HeuristicValue {
        self.relaxed.set_initial_state(initial_state);
        self.relaxed.set_goal_conditions(goal);
        let mut blind = BlindHeuristic::new(&self.relaxed);
        let mut termination = TerminationCondition::unlimited();
        let (result, statistics) =
            BestFirstSearch::astar().search(&self.relaxed, &mut blind, &mut termination);
        debug!(expanded_nodes = statistics.expanded_nodes(), "solved relaxation");
        match result {
            SearchResult::Success(plan) => plan.cost().into(),
            _ => HeuristicValue::infinity(),
        }
    }
}

impl Heuristic<State> for PerfectRelaxationHeuristic {
    fn name(&self) -> String {
        "perfect".to_owned()
    }

    fn evaluate(&mut self, state: &State, problem: &Problem) -> HeuristicValue {
        if problem.is_goal_state(state) {
            return 0.0.into();
        }
        self.solve(state.clone(), self.goal.clone())
    }
}

impl Heuristic<ConditionsCnf> for PerfectRelaxationHeuristic {
    fn name(&self) -> String {
        "perfect".to_owned()
    }

    fn evaluate(&mut self, conditions: &ConditionsCnf, problem: &Problem) -> HeuristicValue {
        if problem.is_initial_state_satisfying(conditions) {
            return 0.0.into();
        }
        self.solve(self.initial_state.clone(), conditions.clone())
    }
}

impl Heuristic<RelativeState> for PerfectRelaxationHeuristic {
    fn name(&self) -> String {
        "perfect".to_owned()
    }

    fn evaluate(&mut self, relative: &RelativeState, problem: &Problem) -> HeuristicValue {
        let conditions = relative_state_conditions(relative, problem);
        self.evaluate(&conditions, problem)
    }
}

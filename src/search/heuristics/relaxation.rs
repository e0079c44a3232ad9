//! Heuristics read off the relaxed planning graph.

use crate::search::cnf::ConditionsCnf;
use crate::search::heuristics::heuristic::relative_state_conditions;
use crate::search::relaxed::RelaxedPlanningGraph;
use crate::search::{Heuristic, HeuristicValue, Problem, RelativeState, State};
use strum_macros::Display;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RelaxationCost {
    #[strum(serialize = "hmax")]
    Max,
    #[strum(serialize = "hadd")]
    Additive,
    #[strum(serialize = "ff")]
    Ff,
}

#[derive(Debug, Clone)]
pub struct RelaxationHeuristic {
    graph: RelaxedPlanningGraph,
    cost: RelaxationCost,
}

impl RelaxationHeuristic {
    pub fn new(problem: &Problem, cost: RelaxationCost) -> Self {
        Self {
            graph: RelaxedPlanningGraph::new(problem.get_relaxed_problem()),
            cost,
        }
    }

    pub fn hmax(problem: &Problem) -> Self {
        Self::new(problem, RelaxationCost::Max)
    }

    pub fn hadd(problem: &Problem) -> Self {
        Self::new(problem, RelaxationCost::Additive)
    }

    pub fn ff(problem: &Problem) -> Self {
        Self::new(problem, RelaxationCost::Ff)
    }
}

impl Heuristic<State> for RelaxationHeuristic {
    fn name(&self) -> String {
        self.cost.to_string()
    }

    fn evaluate(&mut self, state: &State, problem: &Problem) -> HeuristicValue {
        if problem.is_goal_state(state) {
            return 0.0.into();
        }
        let h = match self.cost {
            RelaxationCost::Max => self.graph.compute_max_forward_cost(state),
            RelaxationCost::Additive => self.graph.compute_additive_forward_cost(state),
            RelaxationCost::Ff => self.graph.compute_ff_cost(state),
        };
        trace!(h, cost = ?self.cost, "evaluated state");
        h.into()
    }
}

impl Heuristic<ConditionsCnf> for RelaxationHeuristic {
    fn name(&self) -> String {
        self.cost.to_string()
    }

    fn evaluate(&mut self, conditions: &ConditionsCnf, problem: &Problem) -> HeuristicValue {
        if problem.is_initial_state_satisfying(conditions) {
            return 0.0.into();
        }
        let h = match self.cost {
            RelaxationCost::Max => self.graph.compute_max_forward_cost_to(conditions),
            RelaxationCost::Additive => self.graph.compute_additive_forward_cost_to(conditions),
            RelaxationCost::Ff => self.graph.compute_ff_cost_to(conditions),
        };
        trace!(h, cost = ?self.cost, "evaluated conditions");
        h.into()
    }
}

impl Heuristic<RelativeState> for RelaxationHeuristic {
    fn name(&self) -> String {
        self.cost.to_string()
    }

    fn evaluate(&mut self, relative: &RelativeState, problem: &Problem) -> HeuristicValue {
        let conditions = relative_state_conditions(relative, problem);
        self.evaluate(&conditions, problem)
    }
}

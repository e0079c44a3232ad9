//! Best-first search over forward states, ordering the open list by a
//! weighted sum of path cost and heuristic value.

use crate::search::search_engines::{
    NodeId, SearchEngine, SearchNodeStatus, SearchResult, SearchSpace, SearchStatistics,
    TerminationCondition, Transition,
};
use crate::search::{Heuristic, HeuristicValue, Operator, Problem, State};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use tracing::debug;

/// Nodes are expanded by increasing `g_weight * g + h_weight * h`, ties
/// broken by lower `h` and then by age. Nodes reached through a cheaper path
/// are reopened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestFirstSearch {
    g_weight: f64,
    h_weight: f64,
}

impl BestFirstSearch {
    pub fn astar() -> Self {
        Self::weighted_astar(1.0)
    }

    pub fn gbfs() -> Self {
        Self {
            g_weight: 0.0,
            h_weight: 1.0,
        }
    }

    pub fn weighted_astar(weight: f64) -> Self {
        Self {
            g_weight: 1.0,
            h_weight: weight,
        }
    }

    fn f(&self, g: f64, h: HeuristicValue) -> HeuristicValue {
        (self.g_weight * g + self.h_weight * h.into_inner()).into()
    }
}

type Priority = Reverse<(HeuristicValue, HeuristicValue, NodeId)>;

impl SearchEngine for BestFirstSearch {
    fn search(
        &mut self,
        problem: &Problem,
        heuristic: &mut dyn Heuristic<State>,
        termination: &mut TerminationCondition,
    ) -> (SearchResult, SearchStatistics) {
        let mut statistics = SearchStatistics::new();
        let mut priority_queue: PriorityQueue<NodeId, Priority> = PriorityQueue::new();
        let mut search_space = SearchSpace::new(problem.get_initial_state().clone());

        let root_id = search_space.root_id();
        let h = heuristic.evaluate(search_space.get_state(root_id), problem);
        statistics.increment_evaluated_nodes();
        statistics.register_heuristic_value(h);
        if h.is_infinite() {
            return (SearchResult::ProvablyUnsolvable, statistics);
        }
        let f = self.f(0.0, h);
        search_space.get_node_mut(root_id).open(0.0, h, f);
        priority_queue.push(root_id, Reverse((f, h, root_id)));

        while let Some((node_id, _)) = priority_queue.pop() {
            termination.log_if_needed();
            if let Some(result) = termination.should_terminate() {
                return (result, statistics);
            }

            let node = search_space.get_node_mut(node_id);
            if node.get_status() != SearchNodeStatus::Open {
                continue;
            }
            node.close();
            let g = node.get_g();
            statistics.increment_expanded_nodes();

            let state = search_space.get_state(node_id).clone();
            if problem.is_goal_state(&state) {
                let plan = search_space.extract_plan(node_id);
                debug!(plan_length = plan.len(), plan_cost = plan.cost(), "found plan");
                return (SearchResult::Success(plan), statistics);
            }

            let successors: Vec<(Operator, State)> = problem.get_successors(&state).collect();
            statistics.increment_generated_operators(successors.len());
            for (operator, successor) in successors {
                let cost = operator.cost(&state);
                let child_g = g + cost;
                let transition = Transition {
                    parent: node_id,
                    operator,
                    cost,
                };

                let Some(child_id) = search_space.find(&successor) else {
                    let h = heuristic.evaluate(&successor, problem);
                    statistics.increment_evaluated_nodes();
                    statistics.increment_generated_nodes(1);
                    statistics.register_heuristic_value(h);
                    let child_id = search_space.insert(
                        successor,
                        transition.parent,
                        transition.operator,
                        transition.cost,
                    );
                    let child = search_space.get_node_mut(child_id);
                    if h.is_infinite() {
                        child.mark_as_deadend();
                    } else {
                        let f = self.f(child_g, h);
                        child.open(child_g, h, f);
                        priority_queue.push(child_id, Reverse((f, h, child_id)));
                    }
                    continue;
                };

                let child = search_space.get_node_mut(child_id);
                if child.get_status() == SearchNodeStatus::Deadend || child_g >= child.get_g() {
                    continue;
                }
                if child.get_status() == SearchNodeStatus::Closed {
                    statistics.increment_reopened_nodes();
                }
                let h = child.get_h();
                let f = self.f(child_g, h);
                child.update_parent(transition);
                child.open(child_g, h, f);
                priority_queue.push(child_id, Reverse((f, h, child_id)));
            }
        }

        (SearchResult::ProvablyUnsolvable, statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::heuristics::{BlindHeuristic, RelaxationHeuristic};
    use crate::test_utils::*;
    use std::time::Duration;

    fn solve(
        problem: &Problem,
        engine: BestFirstSearch,
        heuristic: &mut dyn Heuristic<State>,
    ) -> SearchResult {
        let mut termination = TerminationCondition::unlimited();
        let mut engine = engine;
        engine.search(problem, heuristic, &mut termination).0
    }

    fn plan_cost(result: &SearchResult, problem: &Problem) -> f64 {
        match result {
            SearchResult::Success(plan) => {
                assert!(plan.is_valid(problem));
                plan.cost()
            }
            other => panic!("expected a plan, got {other:?}"),
        }
    }

    #[test]
    fn astar_blind_blocksworld() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut blind = BlindHeuristic::new(&problem);
        let result = solve(&problem, BestFirstSearch::astar(), &mut blind);
        assert_eq!(plan_cost(&result, &problem), 6.0);
    }

    #[test]
    fn astar_hmax_blocksworld() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut hmax = RelaxationHeuristic::hmax(&problem);
        let result = solve(&problem, BestFirstSearch::astar(), &mut hmax);
        assert_eq!(plan_cost(&result, &problem), 6.0);
    }

    #[test]
    fn gbfs_ff_blocksworld() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut ff = RelaxationHeuristic::ff(&problem);
        let result = solve(&problem, BestFirstSearch::gbfs(), &mut ff);
        assert!(plan_cost(&result, &problem) >= 6.0);
    }

    #[test]
    fn weighted_astar_hadd_blocksworld() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut hadd = RelaxationHeuristic::hadd(&problem);
        let result = solve(&problem, BestFirstSearch::weighted_astar(2.0), &mut hadd);
        assert!(plan_cost(&result, &problem) >= 6.0);
    }

    #[test]
    fn astar_respects_action_costs() {
        let problem = Problem::from_text(COUNTERS_DOMAIN_TEXT, COUNTERS_PROBLEM_TEXT).unwrap();
        let mut blind = BlindHeuristic::new(&problem);
        let result = solve(&problem, BestFirstSearch::astar(), &mut blind);
        // three increments beat increment, increment, double
        assert_eq!(plan_cost(&result, &problem), 3.0);
    }

    #[test]
    fn astar_delivers_both_packages() {
        let problem = Problem::from_text(DELIVERY_DOMAIN_TEXT, DELIVERY_PROBLEM_TEXT).unwrap();
        let mut hmax = RelaxationHeuristic::hmax(&problem);
        let result = solve(&problem, BestFirstSearch::astar(), &mut hmax);
        // load, drive, unload, drive back, load, drive, unload
        assert_eq!(plan_cost(&result, &problem), 7.0);
    }

    #[test]
    fn exhausted_state_space_is_unsolvable() {
        let mut problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let stuck = problem.factory().state(&["(on-table a)", "(clear a)"]).unwrap();
        problem.set_initial_state(stuck);
        let mut blind = BlindHeuristic::new(&problem);
        let result = solve(&problem, BestFirstSearch::astar(), &mut blind);
        assert_eq!(result, SearchResult::ProvablyUnsolvable);
    }

    #[test]
    fn time_limit() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut blind = BlindHeuristic::new(&problem);
        let mut termination = TerminationCondition::new(Some(Duration::ZERO), None);
        std::thread::sleep(Duration::from_millis(1));
        let (result, statistics) =
            BestFirstSearch::astar().search(&problem, &mut blind, &mut termination);
        assert_eq!(result, SearchResult::TimeLimitExceeded);
        assert_eq!(statistics.expanded_nodes(), 0);
    }

    #[test]
    fn goal_initial_state_gives_empty_plan() {
        let mut problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let goal_state = problem
            .factory()
            .state(&["(on d c)", "(on-table a)", "(arm-empty)"])
            .unwrap();
        problem.set_initial_state(goal_state);
        let mut blind = BlindHeuristic::new(&problem);
        let result = solve(&problem, BestFirstSearch::gbfs(), &mut blind);
        assert_eq!(result, SearchResult::Success(crate::search::Plan::empty()));
    }
}

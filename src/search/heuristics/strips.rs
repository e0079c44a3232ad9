use crate::search::cnf::ConditionsCnf;
use crate::search::heuristics::heuristic::relative_state_conditions;
use crate::search::{Heuristic, HeuristicValue, Problem, RelativeState, State};

/// Counts the goal clauses a state leaves unsatisfied, or in backward search
/// the clauses of the conditions the initial state leaves unsatisfied.
#[derive(Clone, Debug, Default)]
pub struct StripsHeuristic;

impl StripsHeuristic {
    pub fn new() -> Self {
        StripsHeuristic
    }
}

impl Heuristic<State> for StripsHeuristic {
    fn name(&self) -> String {
        "strips".to_owned()
    }

    fn evaluate(&mut self, state: &State, problem: &Problem) -> HeuristicValue {
        (problem.get_not_accomplished_goals_count(state) as f64).into()
    }
}

impl Heuristic<ConditionsCnf> for StripsHeuristic {
    fn name(&self) -> String {
        "strips".to_owned()
    }

    fn evaluate(&mut self, conditions: &ConditionsCnf, problem: &Problem) -> HeuristicValue {
        (problem.get_not_accomplished_conditions_count(conditions) as f64).into()
    }
}

impl Heuristic<RelativeState> for StripsHeuristic {
    fn name(&self) -> String {
        "strips".to_owned()
    }

    fn evaluate(&mut self, relative: &RelativeState, problem: &Problem) -> HeuristicValue {
        let conditions = relative_state_conditions(relative, problem);
        self.evaluate(&conditions, problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn goal_counting() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut heuristic = StripsHeuristic::new();
        let state = problem.get_initial_state().clone();
        assert_eq!(heuristic.evaluate(&state, &problem), HeuristicValue::from(2.0));

        let halfway = problem
            .factory()
            .state(&["(on d c)", "(on c a)", "(on a b)", "(on-table b)"])
            .unwrap();
        assert_eq!(heuristic.evaluate(&halfway, &problem), HeuristicValue::from(1.0));
    }

    #[test]
    fn backward_goal_counting() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut heuristic = StripsHeuristic::new();
        let relative = problem
            .factory()
            .relative_state(&["(on c a)", "(holding a)", "(clear b)"], &["(arm-empty)"])
            .unwrap();
        // only (on c a) holds initially
        assert_eq!(heuristic.evaluate(&relative, &problem), HeuristicValue::from(3.0));
        assert_eq!(
            heuristic.evaluate(problem.goal(), &problem),
            HeuristicValue::from(2.0)
        );
    }
}

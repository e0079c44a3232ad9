use crate::search::cnf::ConditionsCnf;
use crate::search::{Heuristic, HeuristicValue, NumericExpression, Problem, RelativeState, State};

/// Zero on nodes that already meet their target, otherwise the cost of the
/// cheapest operator. Operators whose cost depends on the state count as
/// free.
#[derive(Clone, Debug)]
pub struct BlindHeuristic {
    cheapest_operator: f64,
}

impl BlindHeuristic {
    pub fn new(problem: &Problem) -> Self {
        let cheapest_operator = problem
            .operators()
            .iter()
            .map(|operator| match &operator.cost {
                None => 1.0,
                Some(NumericExpression::Number(cost)) => cost.into_inner().max(0.0),
                Some(_) => 0.0,
            })
            .min_by(f64::total_cmp)
            .unwrap_or(0.0);
        Self { cheapest_operator }
    }

    fn value(&self, satisfied: bool) -> HeuristicValue {
        if satisfied {
            (0.).into()
        } else {
            self.cheapest_operator.into()
        }
    }
}

impl Heuristic<State> for BlindHeuristic {
    fn name(&self) -> String {
        "blind".to_owned()
    }

    fn evaluate(&mut self, state: &State, problem: &Problem) -> HeuristicValue {
        self.value(problem.is_goal_state(state))
    }
}

impl Heuristic<ConditionsCnf> for BlindHeuristic {
    fn name(&self) -> String {
        "blind".to_owned()
    }

    fn evaluate(&mut self, conditions: &ConditionsCnf, problem: &Problem) -> HeuristicValue {
        self.value(problem.is_initial_state_satisfying(conditions))
    }
}

impl Heuristic<RelativeState> for BlindHeuristic {
    fn name(&self) -> String {
        "blind".to_owned()
    }

    fn evaluate(&mut self, relative: &RelativeState, problem: &Problem) -> HeuristicValue {
        self.value(relative.evaluate(problem.get_initial_state()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn unit_cost_operators() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut heuristic = BlindHeuristic::new(&problem);
        let state = problem.get_initial_state().clone();
        assert_eq!(heuristic.evaluate(&state, &problem), HeuristicValue::from(1.0));
        assert_eq!(heuristic.evaluate(problem.goal(), &problem), HeuristicValue::from(1.0));
    }

    #[test]
    fn cheapest_action_cost() {
        let problem = Problem::from_text(COUNTERS_DOMAIN_TEXT, COUNTERS_PROBLEM_TEXT).unwrap();
        let mut heuristic = BlindHeuristic::new(&problem);
        let state = problem.get_initial_state().clone();
        // increment and decrement cost 1, double costs 2
        assert_eq!(heuristic.evaluate(&state, &problem), HeuristicValue::from(1.0));
    }

    #[test]
    fn relative_states_holding_initially() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut heuristic = BlindHeuristic::new(&problem);
        let factory = problem.factory();
        let holds = factory.relative_state(&["(on c a)"], &["(holding a)"]).unwrap();
        let fails = factory.relative_state(&["(holding a)"], &[]).unwrap();
        assert_eq!(heuristic.evaluate(&holds, &problem), HeuristicValue::from(0.0));
        assert_eq!(heuristic.evaluate(&fails, &problem), HeuristicValue::from(1.0));
    }
}

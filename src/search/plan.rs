//! A plan is a sequence of grounded operators that leads from the initial
//! state to a goal state. This module provides the [`Plan`] struct, which
//! represents a plan.

use crate::search::{IdManagers, Operator, Problem};
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub operator: Operator,
    /// The cost of the operator in the state it was applied in.
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

impl Plan {
    pub fn empty() -> Self {
        Self { steps: vec![] }
    }

    pub fn new(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn cost(&self) -> f64 {
        self.steps.iter().map(|step| step.cost).sum()
    }

    pub fn is_unit_cost(&self) -> bool {
        self.steps.iter().all(|step| step.cost == 1.0)
    }

    /// Whether every step is applicable in turn from the initial state and
    /// the last state is a goal state.
    pub fn is_valid(&self, problem: &Problem) -> bool {
        let evaluation = problem.evaluation();
        let mut state = problem.get_initial_state().clone();
        for step in &self.steps {
            if !step.operator.is_grounded() || !step.operator.is_applicable(&state, evaluation) {
                return false;
            }
            state = step.operator.apply(&state, evaluation);
        }
        problem.is_goal_state(&state)
    }

    /// One operator per line followed by a cost comment, the format plan
    /// validators read.
    pub fn human_readable(&self, symbols: &IdManagers) -> String {
        let mut lines: Vec<String> = self
            .steps
            .iter()
            .map(|step| step.operator.human_readable(symbols))
            .collect();
        lines.push(if self.is_unit_cost() {
            format!("; cost = {} (unit cost)", self.cost())
        } else {
            format!("; cost = {} (general cost)", self.cost())
        });
        lines.join("\n")
    }
}

impl IntoIterator for Plan {
    type Item = PlanStep;
    type IntoIter = std::vec::IntoIter<PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl Deref for Plan {
    type Target = [PlanStep];

    fn deref(&self) -> &Self::Target {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use std::rc::Rc;

    fn step(problem: &Problem, name: &str, arguments: &[&str]) -> PlanStep {
        let lifted = problem
            .operators()
            .iter()
            .find(|operator| operator.name.as_str() == name)
            .unwrap();
        let bindings: Vec<_> = lifted
            .parameters
            .variable_ids()
            .zip(arguments.iter().copied())
            .collect();
        let substitution = problem.factory().substitution(&bindings).unwrap();
        PlanStep {
            operator: Operator::new(Rc::clone(lifted), substitution),
            cost: 1.0,
        }
    }

    fn blocksworld_plan(problem: &Problem) -> Plan {
        Plan::new(vec![
            step(problem, "unstack", &["c", "a"]),
            step(problem, "putdown", &["c"]),
            step(problem, "unstack", &["a", "b"]),
            step(problem, "putdown", &["a"]),
            step(problem, "pickup", &["d"]),
            step(problem, "stack", &["d", "c"]),
        ])
    }

    #[test]
    fn valid_plan() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let plan = blocksworld_plan(&problem);
        assert_eq!(plan.len(), 6);
        assert_eq!(plan.cost(), 6.0);
        assert!(plan.is_valid(&problem));
    }

    #[test]
    fn invalid_plans() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut steps = blocksworld_plan(&problem).steps().to_vec();
        steps.pop();
        assert!(!Plan::new(steps.clone()).is_valid(&problem));
        steps.swap(0, 1);
        assert!(!Plan::new(steps).is_valid(&problem));
        assert!(!Plan::empty().is_valid(&problem));
    }

    #[test]
    fn human_readable() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let text = blocksworld_plan(&problem).human_readable(problem.symbols());
        assert_eq!(
            text,
            "(unstack c a)\n(putdown c)\n(unstack a b)\n(putdown a)\n(pickup d)\n(stack d c)\n\
             ; cost = 6 (unit cost)"
        );
    }
}

use crate::search::cnf::ConditionsCnf;
use crate::search::heuristics::{
    BlindHeuristic, PerfectRelaxationHeuristic, RelaxationHeuristic, StripsHeuristic,
};
use crate::search::{Problem, RelativeState, State};
use ordered_float::OrderedFloat;
use std::fmt::Debug;

pub type HeuristicValue = OrderedFloat<f64>;

/// An estimate of the cost between a search node and the other end of the
/// search. Forward search evaluates states towards the goal; backward search
/// evaluates conditions or relative states from the initial state.
pub trait Heuristic<T>: Debug {
    /// Evaluate the given node with respect to the given problem.
    fn evaluate(&mut self, node: &T, problem: &Problem) -> HeuristicValue;

    /// A short name for logs and statistics.
    fn name(&self) -> String;

    /// Evaluate a batch of nodes with respect to the given problem. The
    /// default implementation simply calls `evaluate` for each node
    /// sequentially.
    fn evaluate_batch(&mut self, nodes: &[T], problem: &Problem) -> Vec<HeuristicValue> {
        nodes
            .iter()
            .map(|node| self.evaluate(node, problem))
            .collect()
    }
}

/// The conditions a relative state stands for, so that heuristics for
/// backward search treat both node kinds alike.
pub(crate) fn relative_state_conditions(
    relative: &RelativeState,
    problem: &Problem,
) -> ConditionsCnf {
    ConditionsCnf::from_conditions(&relative.describing_conditions(), problem.hierarchy())
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicName {
    #[clap(help = "Zero on goals, the cheapest operator cost elsewhere.")]
    Blind,
    #[clap(help = "The number of unsatisfied goal clauses.")]
    Strips,
    #[clap(name = "hmax", help = "The h_max heuristic over the delete relaxation.")]
    Hmax,
    #[clap(name = "hadd", help = "The h_add heuristic over the delete relaxation.")]
    Hadd,
    #[clap(name = "ff", help = "The size of an FF relaxed plan.")]
    Ff,
    #[clap(
        help = "The optimal cost of the delete relaxation, found by A*. Expensive."
    )]
    Perfect,
}

impl HeuristicName {
    /// A heuristic for forward search over states.
    pub fn create(&self, problem: &Problem) -> Box<dyn Heuristic<State>> {
        match self {
            HeuristicName::Blind => Box::new(BlindHeuristic::new(problem)),
            HeuristicName::Strips => Box::new(StripsHeuristic::new()),
            HeuristicName::Hmax => Box::new(RelaxationHeuristic::hmax(problem)),
            HeuristicName::Hadd => Box::new(RelaxationHeuristic::hadd(problem)),
            HeuristicName::Ff => Box::new(RelaxationHeuristic::ff(problem)),
            HeuristicName::Perfect => Box::new(PerfectRelaxationHeuristic::new(problem)),
        }
    }

    /// A heuristic for backward search over regressed conditions.
    pub fn create_backward(&self, problem: &Problem) -> Box<dyn Heuristic<ConditionsCnf>> {
        match self {
            HeuristicName::Blind => Box::new(BlindHeuristic::new(problem)),
            HeuristicName::Strips => Box::new(StripsHeuristic::new()),
            HeuristicName::Hmax => Box::new(RelaxationHeuristic::hmax(problem)),
            HeuristicName::Hadd => Box::new(RelaxationHeuristic::hadd(problem)),
            HeuristicName::Ff => Box::new(RelaxationHeuristic::ff(problem)),
            HeuristicName::Perfect => Box::new(PerfectRelaxationHeuristic::new(problem)),
        }
    }

    /// Whether the heuristic never overestimates the optimal plan cost.
    pub fn is_admissible(&self) -> bool {
        matches!(
            self,
            HeuristicName::Blind | HeuristicName::Hmax | HeuristicName::Perfect
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use clap::ValueEnum;

    #[test]
    fn names_are_kebab_case() {
        let names: Vec<String> = HeuristicName::value_variants()
            .iter()
            .filter_map(|name| name.to_possible_value())
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(names, ["blind", "strips", "hmax", "hadd", "ff", "perfect"]);
    }

    #[test]
    fn created_heuristics_agree_on_goal_states() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let goal_state = problem
            .factory()
            .state(&["(on d c)", "(on c a)", "(on-table a)", "(clear d)", "(arm-empty)"])
            .unwrap();
        for name in HeuristicName::value_variants() {
            let mut heuristic = name.create(&problem);
            assert_eq!(
                heuristic.evaluate(&goal_state, &problem),
                HeuristicValue::from(0.0),
                "{name:?}"
            );
        }
    }

    #[test]
    fn created_heuristics_report_their_names() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let names: Vec<String> = HeuristicName::value_variants()
            .iter()
            .map(|name| name.create(&problem).name())
            .collect();
        assert_eq!(names, ["blind", "strips", "hmax", "hadd", "ff", "perfect"]);
    }

    #[test]
    fn backward_heuristics_are_zero_on_the_initial_state() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let on = problem.factory().atom("(on c a)").unwrap();
        let conditions = problem.conditions(&crate::search::Expression::Predicate(on));
        for name in HeuristicName::value_variants() {
            let mut heuristic = name.create_backward(&problem);
            assert_eq!(
                heuristic.evaluate(&conditions, &problem),
                HeuristicValue::from(0.0),
                "{name:?}"
            );
        }
    }
}

use crate::search::search_engines::{BestFirstSearch, SearchStatistics, TerminationCondition};
use crate::search::{Heuristic, Plan, Problem, State};
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// The search was successful
    Success(Plan),
    /// The whole reachable state space was explored without meeting a goal
    ProvablyUnsolvable,
    /// The search engine ran out of memory
    MemoryLimitExceeded,
    /// The search engine ran out of time
    TimeLimitExceeded,
}

pub trait SearchEngine: Debug {
    fn search(
        &mut self,
        problem: &Problem,
        heuristic: &mut dyn Heuristic<State>,
        termination: &mut TerminationCondition,
    ) -> (SearchResult, SearchStatistics);
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SearchEngineName {
    #[clap(help = "A*, optimal with an admissible heuristic.")]
    Astar,
    #[clap(help = "Greedy best-first search, ordered by the heuristic alone.")]
    Gbfs,
    #[clap(help = "A* with the heuristic scaled by the weight.")]
    WeightedAstar,
}

impl SearchEngineName {
    /// `weight` only matters for weighted A*.
    pub fn create(&self, weight: f64) -> Box<dyn SearchEngine> {
        match self {
            SearchEngineName::Astar => Box::new(BestFirstSearch::astar()),
            SearchEngineName::Gbfs => Box::new(BestFirstSearch::gbfs()),
            SearchEngineName::WeightedAstar => Box::new(BestFirstSearch::weighted_astar(weight)),
        }
    }

    pub fn search(
        &self,
        problem: &Problem,
        heuristic: &mut dyn Heuristic<State>,
        weight: f64,
        termination: &mut TerminationCondition,
    ) -> (SearchResult, SearchStatistics) {
        self.create(weight).search(problem, heuristic, termination)
    }
}

mod best_first_search;
mod search_engine;
mod search_node;
mod search_space;
mod search_statistics;
mod termination_condition;

pub use best_first_search::BestFirstSearch;
pub use search_engine::{SearchEngine, SearchEngineName, SearchResult};
pub use search_node::{NodeId, SearchNode, SearchNodeStatus, Transition};
pub use search_space::SearchSpace;
pub use search_statistics::SearchStatistics;
pub use termination_condition::TerminationCondition;

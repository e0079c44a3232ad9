mod blind;
mod combinators;
mod heuristic;
mod pdb;
mod perfect_relaxation;
mod relaxation;
mod statistics;
mod strips;

pub use blind::BlindHeuristic;
pub use combinators::{MaxOf, MinOf, SumOf, Weighted, WeightedSum};
pub use heuristic::{Heuristic, HeuristicName, HeuristicValue};
pub use pdb::{PatternDatabase, PdbHeuristic};
pub use perfect_relaxation::PerfectRelaxationHeuristic;
pub use relaxation::{RelaxationCost, RelaxationHeuristic};
pub use statistics::{HeuristicStatistics, StatisticsCollector};
pub use strips::StripsHeuristic;

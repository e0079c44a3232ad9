use crate::search::{Heuristic, HeuristicValue, Problem};
use ordered_float::Float;
use tracing::info;

/// Counts of the values a heuristic returned. The average only covers
/// finite values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicStatistics {
    pub evaluations: usize,
    pub dead_ends: usize,
    pub average: f64,
    pub best: HeuristicValue,
}

impl Default for HeuristicStatistics {
    fn default() -> Self {
        Self {
            evaluations: 0,
            dead_ends: 0,
            average: 0.0,
            best: HeuristicValue::infinity(),
        }
    }
}

impl HeuristicStatistics {
    fn register(&mut self, value: HeuristicValue) {
        self.evaluations += 1;
        if value.is_infinite() {
            self.dead_ends += 1;
            return;
        }
        let finite = (self.evaluations - self.dead_ends) as f64;
        self.average += (value.into_inner() - self.average) / finite;
        if value < self.best {
            self.best = value;
        }
    }
}

/// Wraps a heuristic and records what it returns.
#[derive(Debug)]
pub struct StatisticsCollector<H> {
    heuristic: H,
    statistics: HeuristicStatistics,
}

impl<H> StatisticsCollector<H> {
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            statistics: HeuristicStatistics::default(),
        }
    }

    pub fn statistics(&self) -> HeuristicStatistics {
        self.statistics
    }

    pub fn into_inner(self) -> H {
        self.heuristic
    }

    pub fn log(&self) {
        info!(
            heuristic_evaluations = self.statistics.evaluations,
            heuristic_dead_ends = self.statistics.dead_ends,
            average_heuristic_value = self.statistics.average,
            best_heuristic_value = self.statistics.best.into_inner(),
        );
    }
}

impl<T, H: Heuristic<T>> Heuristic<T> for StatisticsCollector<H> {
    fn name(&self) -> String {
        self.heuristic.name()
    }

    fn evaluate(&mut self, node: &T, problem: &Problem) -> HeuristicValue {
        let value = self.heuristic.evaluate(node, problem);
        self.statistics.register(value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::heuristics::{RelaxationHeuristic, StripsHeuristic};
    use crate::test_utils::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn records_every_evaluation() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let factory = problem.factory();
        let mut collector = StatisticsCollector::new(StripsHeuristic::new());
        let initial = problem.get_initial_state().clone();
        let halfway = factory.state(&["(on d c)"]).unwrap();
        collector.evaluate(&initial, &problem);
        collector.evaluate(&halfway, &problem);

        let statistics = collector.statistics();
        assert_eq!(statistics.evaluations, 2);
        assert_eq!(statistics.dead_ends, 0);
        assert_approx_eq!(statistics.average, 1.5);
        assert_eq!(statistics.best, HeuristicValue::from(1.0));
    }

    #[test]
    fn dead_ends_stay_out_of_the_average() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let mut collector = StatisticsCollector::new(RelaxationHeuristic::hmax(&problem));
        let stuck = problem.factory().state(&["(on-table a)"]).unwrap();
        collector.evaluate(problem.get_initial_state(), &problem);
        collector.evaluate(&stuck, &problem);

        let statistics = collector.statistics();
        assert_eq!(statistics.evaluations, 2);
        assert_eq!(statistics.dead_ends, 1);
        assert_approx_eq!(statistics.average, 3.0);
        assert_eq!(statistics.best, HeuristicValue::from(3.0));
    }
}

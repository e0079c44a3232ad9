//! Heuristics built from other heuristics.

use crate::search::{Heuristic, HeuristicValue, Problem};
use itertools::Itertools;
use ordered_float::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;

/// The smallest estimate of its components, infinite without components.
#[derive(Debug)]
pub struct MinOf<T> {
    components: Vec<Box<dyn Heuristic<T>>>,
}

impl<T> MinOf<T> {
    pub fn new(components: Vec<Box<dyn Heuristic<T>>>) -> Self {
        Self { components }
    }
}

impl<T: Debug> Heuristic<T> for MinOf<T> {
    fn name(&self) -> String {
        format!("min({})", names(&self.components))
    }

    fn evaluate(&mut self, node: &T, problem: &Problem) -> HeuristicValue {
        self.components
            .iter_mut()
            .map(|component| component.evaluate(node, problem))
            .min()
            .unwrap_or_else(HeuristicValue::infinity)
    }
}

/// The largest estimate of its components, zero without components.
#[derive(Debug)]
pub struct MaxOf<T> {
    components: Vec<Box<dyn Heuristic<T>>>,
}

impl<T> MaxOf<T> {
    pub fn new(components: Vec<Box<dyn Heuristic<T>>>) -> Self {
        Self { components }
    }
}

impl<T: Debug> Heuristic<T> for MaxOf<T> {
    fn name(&self) -> String {
        format!("max({})", names(&self.components))
    }

    fn evaluate(&mut self, node: &T, problem: &Problem) -> HeuristicValue {
        self.components
            .iter_mut()
            .map(|component| component.evaluate(node, problem))
            .max()
            .unwrap_or_else(|| 0.0.into())
    }
}

#[derive(Debug)]
pub struct SumOf<T> {
    components: Vec<Box<dyn Heuristic<T>>>,
}

impl<T> SumOf<T> {
    pub fn new(components: Vec<Box<dyn Heuristic<T>>>) -> Self {
        Self { components }
    }
}

impl<T: Debug> Heuristic<T> for SumOf<T> {
    fn name(&self) -> String {
        format!("sum({})", names(&self.components))
    }

    fn evaluate(&mut self, node: &T, problem: &Problem) -> HeuristicValue {
        self.components
            .iter_mut()
            .map(|component| component.evaluate(node, problem))
            .sum()
    }
}

/// Scales an estimate. Dead ends stay infinite whatever the weight.
#[derive(Debug)]
pub struct Weighted<T> {
    component: Box<dyn Heuristic<T>>,
    weight: f64,
}

impl<T> Weighted<T> {
    pub fn new(component: Box<dyn Heuristic<T>>, weight: f64) -> Self {
        Self { component, weight }
    }
}

impl<T: Debug> Heuristic<T> for Weighted<T> {
    fn name(&self) -> String {
        format!("{} * {}", self.weight, self.component.name())
    }

    fn evaluate(&mut self, node: &T, problem: &Problem) -> HeuristicValue {
        scale(self.component.evaluate(node, problem), self.weight)
    }
}

/// A sampled weighted sum. Each evaluation draws a number in `[0, 1)`: below
/// the share of the heaviest component in the total weight, the heaviest
/// component's own value is returned; otherwise the full weighted sum.
#[derive(Debug)]
pub struct WeightedSum<T> {
    components: Vec<(Box<dyn Heuristic<T>>, f64)>,
    rng: StdRng,
}

impl<T> WeightedSum<T> {
    pub fn new(components: Vec<(Box<dyn Heuristic<T>>, f64)>, seed: u64) -> Self {
        Self {
            components,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<T: Debug> Heuristic<T> for WeightedSum<T> {
    fn name(&self) -> String {
        let terms = self
            .components
            .iter()
            .map(|(component, weight)| format!("{} * {}", weight, component.name()))
            .join(", ");
        format!("wsum({terms})")
    }

    fn evaluate(&mut self, node: &T, problem: &Problem) -> HeuristicValue {
        let total_weight: f64 = self.components.iter().map(|(_, weight)| weight).sum();
        let heaviest = self
            .components
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.1.total_cmp(&b.1))
            .map(|(index, _)| index);
        let Some(heaviest) = heaviest else {
            return 0.0.into();
        };

        let draw: f64 = self.rng.gen();
        if total_weight > 0.0 && draw < self.components[heaviest].1 / total_weight {
            return self.components[heaviest].0.evaluate(node, problem);
        }
        self.components
            .iter_mut()
            .map(|(component, weight)| scale(component.evaluate(node, problem), *weight))
            .sum()
    }
}

fn names<T>(components: &[Box<dyn Heuristic<T>>]) -> String {
    components.iter().map(|component| component.name()).join(", ")
}

fn scale(value: HeuristicValue, weight: f64) -> HeuristicValue {
    if value.is_infinite() {
        value
    } else {
        (value.into_inner() * weight).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::heuristics::{BlindHeuristic, RelaxationHeuristic, StripsHeuristic};
    use crate::search::State;
    use crate::test_utils::*;

    /// Always returns the same value.
    #[derive(Debug)]
    struct Constant(f64);

    impl Heuristic<State> for Constant {
        fn evaluate(&mut self, _state: &State, _problem: &Problem) -> HeuristicValue {
            self.0.into()
        }

        fn name(&self) -> String {
            format!("constant {}", self.0)
        }
    }

    fn blocksworld() -> Problem {
        Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap()
    }

    #[test]
    fn min_max_and_sum() {
        let problem = blocksworld();
        let state = problem.get_initial_state();
        // blind 1, strips 2, hmax 3
        let components = || -> Vec<Box<dyn Heuristic<State>>> {
            vec![
                Box::new(BlindHeuristic::new(&problem)),
                Box::new(StripsHeuristic::new()),
                Box::new(RelaxationHeuristic::hmax(&problem)),
            ]
        };
        assert_eq!(
            MinOf::new(components()).evaluate(state, &problem),
            HeuristicValue::from(1.0)
        );
        assert_eq!(
            MaxOf::new(components()).evaluate(state, &problem),
            HeuristicValue::from(3.0)
        );
        assert_eq!(
            SumOf::new(components()).evaluate(state, &problem),
            HeuristicValue::from(6.0)
        );
    }

    #[test]
    fn empty_combinations() {
        let problem = blocksworld();
        let state = problem.get_initial_state();
        assert!(MinOf::<State>::new(vec![]).evaluate(state, &problem).is_infinite());
        assert_eq!(
            MaxOf::<State>::new(vec![]).evaluate(state, &problem),
            HeuristicValue::from(0.0)
        );
        assert_eq!(
            WeightedSum::<State>::new(vec![], 0).evaluate(state, &problem),
            HeuristicValue::from(0.0)
        );
    }

    #[test]
    fn weighting_keeps_dead_ends() {
        let problem = blocksworld();
        let state = problem.get_initial_state();
        let mut zero_weight = Weighted::new(Box::new(Constant(f64::INFINITY)), 0.0);
        assert!(zero_weight.evaluate(state, &problem).is_infinite());
        let mut doubled = Weighted::new(Box::new(Constant(2.5)), 2.0);
        assert_eq!(doubled.evaluate(state, &problem), HeuristicValue::from(5.0));
    }

    #[test]
    fn weighted_sum_samples_between_heaviest_and_sum() {
        let problem = blocksworld();
        let state = problem.get_initial_state();
        let components: Vec<(Box<dyn Heuristic<State>>, f64)> =
            vec![(Box::new(Constant(1.0)), 3.0), (Box::new(Constant(10.0)), 1.0)];
        let mut heuristic = WeightedSum::new(components, 7);

        let mut heaviest_only = 0;
        let mut full_sum = 0;
        for _ in 0..200 {
            let h = heuristic.evaluate(state, &problem);
            if h == HeuristicValue::from(1.0) {
                heaviest_only += 1;
            } else {
                assert_eq!(h, HeuristicValue::from(13.0));
                full_sum += 1;
            }
        }
        // the heaviest component carries three quarters of the weight
        assert!(heaviest_only > full_sum);
        assert!(full_sum > 0);
    }

    #[test]
    fn weighted_sum_is_reproducible() {
        let problem = blocksworld();
        let state = problem.get_initial_state();
        let values = |seed| {
            let components: Vec<(Box<dyn Heuristic<State>>, f64)> =
                vec![(Box::new(Constant(1.0)), 1.0), (Box::new(Constant(4.0)), 1.0)];
            let mut heuristic = WeightedSum::new(components, seed);
            (0..20)
                .map(|_| heuristic.evaluate(state, &problem))
                .collect::<Vec<_>>()
        };
        assert_eq!(values(42), values(42));
    }

    #[test]
    fn names_describe_components() {
        let components: Vec<Box<dyn Heuristic<State>>> =
            vec![Box::new(Constant(1.0)), Box::new(Constant(2.5))];
        assert_eq!(
            MinOf::new(components).name(),
            "min(constant 1, constant 2.5)"
        );
        let weighted: Box<dyn Heuristic<State>> =
            Box::new(Weighted::new(Box::new(Constant(1.0)), 2.0));
        assert_eq!(weighted.name(), "2 * constant 1");
        let sampled = WeightedSum::<State>::new(vec![(weighted, 3.0)], 0);
        assert_eq!(sampled.name(), "wsum(3 * 2 * constant 1)");
    }
}

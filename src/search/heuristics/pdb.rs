use crate::search::{Heuristic, HeuristicValue, Problem, State};
use ordered_float::Float;
use std::fmt::Debug;

/// A precomputed table of abstract goal distances over a projection of the
/// state space. How the projection is chosen and the table built is up to
/// the implementation.
pub trait PatternDatabase: Debug {
    /// The goal distance of the abstract state `state` projects to, `None`
    /// when that abstract state cannot reach the goal.
    fn lookup(&self, state: &State) -> Option<f64>;
}

#[derive(Debug)]
pub struct PdbHeuristic<D: PatternDatabase> {
    database: D,
}

impl<D: PatternDatabase> PdbHeuristic<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &D {
        &self.database
    }
}

impl<D: PatternDatabase> Heuristic<State> for PdbHeuristic<D> {
    fn name(&self) -> String {
        "pdb".to_owned()
    }

    fn evaluate(&mut self, state: &State, _problem: &Problem) -> HeuristicValue {
        match self.database.lookup(state) {
            Some(distance) => distance.into(),
            None => HeuristicValue::infinity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Atom, PredicateId};
    use crate::test_utils::*;
    use std::collections::{BTreeSet, HashMap};

    /// Projects states onto a single predicate.
    #[derive(Debug)]
    struct PredicateProjection {
        predicate: PredicateId,
        distances: HashMap<BTreeSet<Atom>, f64>,
    }

    impl PatternDatabase for PredicateProjection {
        fn lookup(&self, state: &State) -> Option<f64> {
            let pattern: BTreeSet<Atom> = state
                .predicates()
                .iter()
                .filter(|atom| atom.name_id == self.predicate)
                .cloned()
                .collect();
            self.distances.get(&pattern).copied()
        }
    }

    #[test]
    fn looks_up_the_projected_state() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let factory = problem.factory();
        let holding = factory.atom("(holding a)").unwrap();
        let database = PredicateProjection {
            predicate: holding.name_id,
            distances: HashMap::from([(BTreeSet::new(), 2.0), (BTreeSet::from([holding]), 1.0)]),
        };
        let mut heuristic = PdbHeuristic::new(database);

        let initial = problem.get_initial_state();
        assert_eq!(heuristic.evaluate(initial, &problem), HeuristicValue::from(2.0));
        let holding_a = factory.state(&["(holding a)"]).unwrap();
        assert_eq!(heuristic.evaluate(&holding_a, &problem), HeuristicValue::from(1.0));
        let holding_b = factory.state(&["(holding b)"]).unwrap();
        assert!(heuristic.evaluate(&holding_b, &problem).is_infinite());
    }
}

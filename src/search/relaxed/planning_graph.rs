use crate::search::cnf::{ConditionsCnf, Proposition};
use crate::search::evaluation::StateLabels;
use crate::search::grounding::GroundDeep;
use crate::search::relaxed::RelaxedProblem;
use crate::search::{Atom, State, Substitution};
use std::collections::{HashMap, HashSet};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CostRule {
    Max,
    Additive,
}

/// The labelled atoms of one expansion and the action that first gave each
/// atom its current label.
#[derive(Debug, Clone, Default)]
struct Expansion {
    labels: StateLabels,
    supporters: HashMap<Atom, usize>,
    layers: usize,
}

/// Layered forward fixpoint over a delete relaxed problem. Each layer fires
/// every action whose preconditions are reachable with the labels of the
/// previous layer; an added atom is labelled with the cost of the action's
/// preconditions plus one.
///
/// Costs towards the goal are computed from any state. Costs towards other
/// conditions are computed from the initial state, whose expansion is built
/// once and reused.
#[derive(Debug, Clone)]
pub struct RelaxedPlanningGraph {
    relaxed: RelaxedProblem,
    initial_max: Option<Expansion>,
    initial_additive: Option<Expansion>,
}

impl RelaxedPlanningGraph {
    pub fn new(relaxed: RelaxedProblem) -> Self {
        Self {
            relaxed,
            initial_max: None,
            initial_additive: None,
        }
    }

    pub fn relaxed_problem(&self) -> &RelaxedProblem {
        &self.relaxed
    }

    /// h_max of `state`: the layer at which the goal first becomes
    /// reachable, infinite when it never does.
    pub fn compute_max_forward_cost(&self, state: &State) -> f64 {
        let goal = self.relaxed.problem().goal();
        let expansion = self.expand(state, CostRule::Max, Some(goal));
        self.conditions_cost(goal, &expansion, state, CostRule::Max)
    }

    /// h_add of `state`, summing the labels of the goal literals.
    pub fn compute_additive_forward_cost(&self, state: &State) -> f64 {
        let goal = self.relaxed.problem().goal();
        let expansion = self.expand(state, CostRule::Additive, None);
        self.conditions_cost(goal, &expansion, state, CostRule::Additive)
    }

    /// The number of actions in a relaxed plan for the goal extracted from
    /// `state`, infinite when the goal is unreachable.
    pub fn compute_ff_cost(&self, state: &State) -> f64 {
        let goal = self.relaxed.problem().goal();
        let expansion = self.expand(state, CostRule::Max, Some(goal));
        self.relaxed_plan_size(goal, &expansion, state)
    }

    pub fn compute_max_forward_cost_to(&mut self, conditions: &ConditionsCnf) -> f64 {
        self.prepare_initial(CostRule::Max);
        let (expansion, initial) = self.initial(CostRule::Max);
        self.conditions_cost(conditions, expansion, initial, CostRule::Max)
    }

    pub fn compute_additive_forward_cost_to(&mut self, conditions: &ConditionsCnf) -> f64 {
        self.prepare_initial(CostRule::Additive);
        let (expansion, initial) = self.initial(CostRule::Additive);
        self.conditions_cost(conditions, expansion, initial, CostRule::Additive)
    }

    pub fn compute_ff_cost_to(&mut self, conditions: &ConditionsCnf) -> f64 {
        self.prepare_initial(CostRule::Max);
        let (expansion, initial) = self.initial(CostRule::Max);
        self.relaxed_plan_size(conditions, expansion, initial)
    }

    /// The labels reached from `state` once no layer adds anything new.
    pub fn state_labels(&self, state: &State) -> StateLabels {
        self.expand(state, CostRule::Max, None).labels
    }

    fn prepare_initial(&mut self, rule: CostRule) {
        let slot = match rule {
            CostRule::Max => &mut self.initial_max,
            CostRule::Additive => &mut self.initial_additive,
        };
        if slot.is_none() {
            let initial = self.relaxed.problem().get_initial_state();
            *slot = Some(expand(&self.relaxed, initial, rule, None));
        }
    }

    fn initial(&self, rule: CostRule) -> (&Expansion, &State) {
        let slot = match rule {
            CostRule::Max => &self.initial_max,
            CostRule::Additive => &self.initial_additive,
        };
        (
            slot.as_ref().expect("initial expansion is prepared before use"),
            self.relaxed.problem().get_initial_state(),
        )
    }

    fn expand(&self, origin: &State, rule: CostRule, target: Option<&ConditionsCnf>) -> Expansion {
        expand(&self.relaxed, origin, rule, target)
    }

    fn conditions_cost(
        &self,
        conditions: &ConditionsCnf,
        expansion: &Expansion,
        origin: &State,
        rule: CostRule,
    ) -> f64 {
        self.relaxed
            .problem()
            .evaluation()
            .label_cost(
                conditions,
                &Substitution::new(),
                &expansion.labels,
                origin,
                rule == CostRule::Additive,
            )
            .unwrap_or(f64::INFINITY)
    }

    /// Chains back from the conditions through the supporters of their
    /// cheapest literals, counting every action used once.
    fn relaxed_plan_size(
        &self,
        conditions: &ConditionsCnf,
        expansion: &Expansion,
        origin: &State,
    ) -> f64 {
        let Some(mut open) = self.subgoals(conditions, &expansion.labels, origin) else {
            return f64::INFINITY;
        };
        let mut plan = HashSet::new();
        let mut achieved = HashSet::new();
        while let Some(atom) = open.pop() {
            if !achieved.insert(atom.clone()) {
                continue;
            }
            let action = *expansion
                .supporters
                .get(&atom)
                .expect("labelled atom without a supporter");
            if !plan.insert(action) {
                continue;
            }
            let preconditions = &self.relaxed.actions()[action].preconditions;
            match self.subgoals(preconditions, &expansion.labels, origin) {
                Some(atoms) => open.extend(atoms),
                None => return f64::INFINITY,
            }
        }
        trace!(actions = plan.len(), "relaxed plan");
        plan.len() as f64
    }

    /// The atoms still to be achieved for the conditions under their
    /// cheapest binding, one per clause. `None` if the conditions are
    /// unreachable.
    fn subgoals(
        &self,
        conditions: &ConditionsCnf,
        labels: &StateLabels,
        origin: &State,
    ) -> Option<Vec<Atom>> {
        let evaluation = self.relaxed.problem().evaluation();
        let (_, binding) = evaluation
            .hierarchy()
            .bindings(conditions.parameters())
            .into_iter()
            .map(Substitution::from_iter)
            .filter_map(|binding| {
                evaluation
                    .label_cost(conditions, &binding, labels, origin, false)
                    .map(|cost| (cost, binding))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))?;

        let mut atoms = vec![];
        for clause in conditions.clauses() {
            let (label, literal) = clause
                .iter()
                .filter_map(|literal| {
                    evaluation
                        .literal_label(literal, &binding, labels, origin)
                        .map(|label| (label, literal))
                })
                .min_by(|a, b| a.0.total_cmp(&b.0))?;
            if label == 0.0 || literal.is_negated() {
                continue;
            }
            if let Proposition::Predicate(atom) = literal.underlying() {
                let atom = atom.ground_deep(&binding, origin);
                if atom.is_fully_resolved() {
                    atoms.push(atom);
                }
            }
        }
        Some(atoms)
    }
}

fn expand(
    relaxed: &RelaxedProblem,
    origin: &State,
    rule: CostRule,
    target: Option<&ConditionsCnf>,
) -> Expansion {
    let evaluation = relaxed.problem().evaluation();
    let additive = rule == CostRule::Additive;
    let none = Substitution::new();

    let mut expansion = Expansion::default();
    for atom in origin.predicates() {
        expansion.labels.insert_if_absent(atom.clone(), 0.0);
    }

    loop {
        // Later layers never lower a max label, so the goal cost is final.
        if let Some(target) = target {
            if rule == CostRule::Max
                && evaluation
                    .label_cost(target, &none, &expansion.labels, origin, false)
                    .is_some()
            {
                break;
            }
        }

        let mut updates = vec![];
        for (index, action) in relaxed.actions().iter().enumerate() {
            let Some(cost) = evaluation.label_cost(
                &action.preconditions,
                &none,
                &expansion.labels,
                origin,
                additive,
            ) else {
                continue;
            };
            for atom in &action.adds {
                let atom = atom.ground_deep(&none, origin);
                if atom.is_fully_resolved() {
                    updates.push((atom, cost + 1.0, index));
                }
            }
        }

        let mut changed = false;
        for (atom, label, index) in updates {
            match expansion.labels.get(&atom) {
                Some(existing) if existing <= label => {}
                Some(_) => {
                    expansion.labels.lower(&atom, label);
                    expansion.supporters.insert(atom, index);
                    changed = true;
                }
                None => {
                    expansion.labels.insert_if_absent(atom.clone(), label);
                    expansion.supporters.insert(atom, index);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
        expansion.layers += 1;
    }

    trace!(
        layers = expansion.layers,
        atoms = expansion.labels.len(),
        "expanded relaxed planning graph"
    );
    expansion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Problem;
    use crate::test_utils::*;
    use assert_approx_eq::assert_approx_eq;
    use std::collections::VecDeque;

    fn blocksworld() -> Problem {
        Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap()
    }

    fn graph(problem: &Problem) -> RelaxedPlanningGraph {
        RelaxedPlanningGraph::new(problem.get_relaxed_problem())
    }

    #[test]
    fn blocksworld_initial_costs() {
        let problem = blocksworld();
        let graph = graph(&problem);
        let state = problem.get_initial_state();

        // (on-table a) needs unstack c a, unstack a b, putdown a
        assert_approx_eq!(graph.compute_max_forward_cost(state), 3.0);
        // 2 for (on d c) plus 3 for (on-table a)
        assert_approx_eq!(graph.compute_additive_forward_cost(state), 5.0);
        // pickup d, stack d c, unstack c a, unstack a b, putdown a
        assert_approx_eq!(graph.compute_ff_cost(state), 5.0);
    }

    #[test]
    fn labels_are_layers() {
        let problem = blocksworld();
        let graph = graph(&problem);
        let factory = problem.factory();
        let labels = graph.state_labels(problem.get_initial_state());

        assert_eq!(labels.get(&factory.atom("(on c a)").unwrap()), Some(0.0));
        assert_eq!(labels.get(&factory.atom("(holding d)").unwrap()), Some(1.0));
        assert_eq!(labels.get(&factory.atom("(clear a)").unwrap()), Some(1.0));
        assert_eq!(labels.get(&factory.atom("(holding a)").unwrap()), Some(2.0));
        assert_eq!(labels.get(&factory.atom("(on-table a)").unwrap()), Some(3.0));
    }

    #[test]
    fn goal_states_cost_nothing() {
        let problem = blocksworld();
        let graph = graph(&problem);
        let state = problem
            .factory()
            .state(&["(on d c)", "(on c a)", "(on-table a)", "(clear d)"])
            .unwrap();
        assert!(problem.is_goal_state(&state));
        assert_approx_eq!(graph.compute_max_forward_cost(&state), 0.0);
        assert_approx_eq!(graph.compute_additive_forward_cost(&state), 0.0);
        assert_approx_eq!(graph.compute_ff_cost(&state), 0.0);
    }

    #[test]
    fn unreachable_goals_are_infinite() {
        let problem = blocksworld();
        let graph = graph(&problem);
        let stuck = problem.factory().state(&["(on-table a)"]).unwrap();
        assert!(graph.compute_max_forward_cost(&stuck).is_infinite());
        assert!(graph.compute_additive_forward_cost(&stuck).is_infinite());
        assert!(graph.compute_ff_cost(&stuck).is_infinite());
    }

    #[test]
    fn costs_to_conditions_start_from_the_initial_state() {
        let problem = blocksworld();
        let mut graph = graph(&problem);
        let holding = problem.factory().atom("(holding a)").unwrap();
        let conditions = problem.conditions(&crate::search::Expression::Predicate(holding));

        assert_approx_eq!(graph.compute_max_forward_cost_to(&conditions), 2.0);
        assert_approx_eq!(graph.compute_additive_forward_cost_to(&conditions), 2.0);
        assert_approx_eq!(graph.compute_ff_cost_to(&conditions), 2.0);
        let goal = problem.goal().clone();
        assert_approx_eq!(graph.compute_max_forward_cost_to(&goal), 3.0);
        assert_approx_eq!(graph.compute_additive_forward_cost_to(&goal), 5.0);
    }

    #[test]
    fn conditional_effects_are_reached_optimistically() {
        let problem = Problem::from_text(DELIVERY_DOMAIN_TEXT, DELIVERY_PROBLEM_TEXT).unwrap();
        let graph = graph(&problem);
        let state = problem.get_initial_state();
        // load then unload for each package
        assert_approx_eq!(graph.compute_max_forward_cost(state), 2.0);
        assert_approx_eq!(graph.compute_additive_forward_cost(state), 4.0);
        assert_approx_eq!(graph.compute_ff_cost(state), 4.0);
    }

    #[test]
    fn max_cost_is_the_smallest_estimate() {
        let problem = blocksworld();
        let graph = graph(&problem);
        let mut queue = VecDeque::from([problem.get_initial_state().clone()]);
        let mut seen = HashSet::new();
        while let Some(state) = queue.pop_front() {
            if seen.len() > 60 || !seen.insert(state.clone()) {
                continue;
            }
            let max = graph.compute_max_forward_cost(&state);
            assert!(max <= graph.compute_additive_forward_cost(&state));
            assert!(max <= graph.compute_ff_cost(&state));
            queue.extend(problem.get_successors(&state).map(|(_, successor)| successor));
        }
        assert!(seen.len() > 10);
    }
}

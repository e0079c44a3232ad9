use crate::search::cnf::ConditionsCnf;
use crate::search::effects::PrimitiveEffect;
use crate::search::grounding::Ground;
use crate::search::{
    Atom, Expression, Operator, Parameters, Problem, Substitution, SubstitutionsGenerator,
};
use tracing::debug;

/// A grounded operator of the relaxed problem, or one of its conditional
/// effects with the effect condition folded into the preconditions.
#[derive(Debug, Clone)]
pub struct RelaxedAction {
    pub operator: Operator,
    pub preconditions: ConditionsCnf,
    /// Atoms added when the preconditions hold. They may still mention
    /// object functions, which are resolved in the state being evaluated.
    pub adds: Vec<Atom>,
}

/// A problem whose operators ignore their delete effects, along with the
/// grounded actions the relaxed planning graph fires.
#[derive(Debug, Clone)]
pub struct RelaxedProblem {
    problem: Problem,
    actions: Vec<RelaxedAction>,
}

impl RelaxedProblem {
    pub fn new(problem: &Problem) -> Self {
        let problem = problem.delete_relaxed();
        let actions = ground_actions(&problem);
        debug!(actions = actions.len(), "grounded relaxed problem");
        Self { problem, actions }
    }

    /// The delete relaxed problem, usable by any search engine.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn into_problem(self) -> Problem {
        self.problem
    }

    pub fn actions(&self) -> &[RelaxedAction] {
        &self.actions
    }
}

fn ground_actions(problem: &Problem) -> Vec<RelaxedAction> {
    let hierarchy = problem.hierarchy();
    let rigid = problem.rigid();
    let mut actions = vec![];
    for lifted in problem.operators() {
        let substitutions =
            SubstitutionsGenerator::new(&lifted.parameters, &Substitution::new(), hierarchy);
        for substitution in substitutions {
            let preconditions = lifted
                .preconditions_cnf
                .ground(&substitution)
                .simplified(rigid);
            if preconditions.is_contradictory() {
                continue;
            }

            let mut unconditional = vec![];
            let mut conditional: Vec<(Expression, Vec<Atom>)> = vec![];
            for effect in lifted.effects.instantiate(&substitution, hierarchy) {
                let PrimitiveEffect::Add(atom) = effect.primitive else {
                    continue;
                };
                match effect.condition {
                    None => unconditional.push(atom),
                    Some(condition) => {
                        match conditional.iter_mut().find(|(c, _)| *c == condition) {
                            Some((_, atoms)) => atoms.push(atom),
                            None => conditional.push((condition, vec![atom])),
                        }
                    }
                }
            }

            let operator = Operator::new(lifted.clone(), substitution);
            for (condition, adds) in conditional {
                let condition =
                    ConditionsCnf::from_expression(&condition, Parameters::empty(), hierarchy);
                let preconditions = preconditions.merge(&condition).simplified(rigid);
                if preconditions.is_contradictory() {
                    continue;
                }
                actions.push(RelaxedAction {
                    operator: operator.clone(),
                    preconditions,
                    adds,
                });
            }
            if !unconditional.is_empty() {
                actions.push(RelaxedAction {
                    operator,
                    preconditions,
                    adds: unconditional,
                });
            }
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn blocksworld_grounds_every_operator() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let relaxed = problem.get_relaxed_problem();
        // 4 pickups, 4 putdowns, 16 stacks and 16 unstacks
        assert_eq!(relaxed.actions().len(), 40);
        assert!(relaxed
            .problem()
            .operators()
            .iter()
            .all(|operator| operator.effects.is_delete_relaxed()));
    }

    #[test]
    fn relaxed_successors_keep_deleted_atoms() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let relaxed = problem.get_relaxed_problem();
        let state = relaxed.problem().get_initial_state();
        let arm_empty = relaxed.problem().factory().atom("(arm-empty)").unwrap();
        for (_, successor) in relaxed.problem().get_successors(state) {
            assert!(successor.has_predicate(&arm_empty));
        }
    }

    #[test]
    fn conditional_effects_become_separate_actions() {
        let problem = Problem::from_text(DELIVERY_DOMAIN_TEXT, DELIVERY_PROBLEM_TEXT).unwrap();
        let relaxed = problem.get_relaxed_problem();
        let symbols = problem.symbols();
        // drive only assigns functions, so only load and unload remain
        assert_eq!(relaxed.actions().len(), 4);
        let delivering = relaxed
            .actions()
            .iter()
            .filter(|action| {
                action
                    .adds
                    .iter()
                    .any(|atom| symbols.predicates.name(atom.name_id).as_str() == "delivered")
            })
            .count();
        assert_eq!(delivering, 2);
    }
}

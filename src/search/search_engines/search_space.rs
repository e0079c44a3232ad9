use crate::search::search_engines::{NodeId, SearchNode, Transition};
use crate::search::{Operator, Plan, PlanStep, State};
use segvec::{Linear, SegVec};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};

/// The states met during a search, each with its node. States are looked up
/// by hash and compared on collision.
#[derive(Debug)]
pub struct SearchSpace {
    nodes: SegVec<SearchNode, Linear>,
    states: SegVec<State, Linear>,
    registered_states: HashMap<u64, SmallVec<[NodeId; 1]>>,
    state_build_hasher: RandomState,
}

impl SearchSpace {
    pub fn new(initial_state: State) -> Self {
        let mut space = Self {
            nodes: SegVec::new(),
            states: SegVec::new(),
            registered_states: HashMap::new(),
            state_build_hasher: RandomState::new(),
        };
        let root_id = space.register(initial_state);
        space.nodes.push(SearchNode::new_root(root_id));
        space
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn find(&self, state: &State) -> Option<NodeId> {
        let hash = self.state_build_hasher.hash_one(state);
        self.registered_states
            .get(&hash)?
            .iter()
            .copied()
            .find(|&node_id| self.get_state(node_id) == state)
    }

    /// Adds a state that is not in the space yet, reached from `parent`.
    pub fn insert(&mut self, state: State, parent: NodeId, operator: Operator, cost: f64) -> NodeId {
        debug_assert!(self.find(&state).is_none(), "state is already registered");
        let node_id = self.register(state);
        self.nodes.push(SearchNode::new_with_parent(
            node_id,
            Transition {
                parent,
                operator,
                cost,
            },
        ));
        node_id
    }

    fn register(&mut self, state: State) -> NodeId {
        let node_id = NodeId(self.states.len());
        let hash = self.state_build_hasher.hash_one(&state);
        self.registered_states.entry(hash).or_default().push(node_id);
        self.states.push(state);
        node_id
    }

    /// The operators from the root to the node.
    pub fn extract_plan(&self, node_id: NodeId) -> Plan {
        let mut steps = vec![];
        let mut current = self.get_node(node_id);
        while let Some(transition) = current.get_transition() {
            steps.push(PlanStep {
                operator: transition.operator.clone(),
                cost: transition.cost,
            });
            current = self.get_node(transition.parent);
        }
        steps.reverse();
        Plan::new(steps)
    }

    pub fn get_node(&self, node_id: NodeId) -> &SearchNode {
        self.nodes.get(node_id.0).expect("Invalid node id")
    }

    pub fn get_node_mut(&mut self, node_id: NodeId) -> &mut SearchNode {
        self.nodes.get_mut(node_id.0).expect("Invalid node id")
    }

    pub fn get_state(&self, node_id: NodeId) -> &State {
        self.states.get(node_id.0).expect("Invalid node id")
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Problem;
    use crate::test_utils::*;

    #[test]
    fn registers_states_once() {
        let problem =
            Problem::from_text(BLOCKSWORLD_DOMAIN_TEXT, BLOCKSWORLD_PROBLEM13_TEXT).unwrap();
        let initial = problem.get_initial_state().clone();
        let mut space = SearchSpace::new(initial.clone());
        assert_eq!(space.find(&initial), Some(space.root_id()));

        let (operator, successor) = problem.get_successors(&initial).next().unwrap();
        assert_eq!(space.find(&successor), None);
        let child = space.insert(successor.clone(), space.root_id(), operator, 1.0);
        assert_eq!(space.find(&successor), Some(child));
        assert_eq!(space.len(), 2);

        let plan = space.extract_plan(child);
        assert_eq!(plan.len(), 1);
        assert!(space.extract_plan(space.root_id()).is_empty());
    }
}

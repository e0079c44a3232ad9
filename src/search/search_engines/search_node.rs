use crate::search::{HeuristicValue, Operator};
use ordered_float::Float;

/// Index of a node in its [`SearchSpace`](crate::search::search_engines::SearchSpace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) usize);

/// The status of a search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchNodeStatus {
    /// New node, not yet opened
    New,
    /// Node is in the open list
    Open,
    /// Node is in the closed list
    Closed,
    /// Node is a deadend
    Deadend,
}

/// How a node was reached.
#[derive(Debug, Clone)]
pub struct Transition {
    pub parent: NodeId,
    pub operator: Operator,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    node_id: NodeId,
    status: SearchNodeStatus,
    /// Priority of the node, different depending on the search algorithm.
    f: HeuristicValue,
    /// Cost of the cheapest known path to this node.
    g: f64,
    /// Heuristic estimate of the cost to reach the goal.
    h: HeuristicValue,
    /// `None` for the root.
    transition: Option<Transition>,
}

impl SearchNode {
    pub fn new_root(node_id: NodeId) -> Self {
        Self {
            node_id,
            status: SearchNodeStatus::New,
            f: HeuristicValue::infinity(),
            g: f64::INFINITY,
            h: HeuristicValue::infinity(),
            transition: None,
        }
    }

    pub fn new_with_parent(node_id: NodeId, transition: Transition) -> Self {
        Self {
            transition: Some(transition),
            ..Self::new_root(node_id)
        }
    }

    pub fn open(&mut self, g: f64, h: HeuristicValue, f: HeuristicValue) {
        self.status = SearchNodeStatus::Open;
        self.g = g;
        self.h = h;
        self.f = f;
    }

    /// Reaches the node through a cheaper path.
    pub fn update_parent(&mut self, transition: Transition) {
        debug_assert!(self.transition.is_some(), "the root has no parent");
        self.transition = Some(transition);
    }

    pub fn mark_as_deadend(&mut self) {
        self.status = SearchNodeStatus::Deadend;
        self.f = HeuristicValue::infinity();
    }

    pub fn close(&mut self) {
        debug_assert_eq!(
            self.status,
            SearchNodeStatus::Open,
            "Node must be open to close it"
        );
        self.status = SearchNodeStatus::Closed;
    }

    pub fn get_node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn get_status(&self) -> SearchNodeStatus {
        self.status
    }

    pub fn get_f(&self) -> HeuristicValue {
        self.f
    }

    pub fn get_g(&self) -> f64 {
        self.g
    }

    pub fn get_h(&self) -> HeuristicValue {
        self.h
    }

    pub fn get_transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }
}

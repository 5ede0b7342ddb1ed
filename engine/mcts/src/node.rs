//! MCTS tree node representation.
//!
//! Each node holds the game state reached by taking an action from the parent.
//! Nodes store visit statistics used for UCB1 selection and the final choice.

use games_snake::{Action, SnakeGame};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub action: Option<Action>,

    /// Snapshot of the game at this node
    pub state: SnakeGame,

    /// Actions not yet expanded into children
    pub untried: Vec<Action>,

    /// Children in expansion order: (action, NodeId) pairs
    pub children: Vec<(Action, NodeId)>,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of rollout rewards backpropagated through this node.
    /// Q(s,a) = value_sum / visit_count
    pub value_sum: f32,
}

impl SearchNode {
    /// Create a new root node. Untried actions start as the legal actions.
    pub fn new_root(state: SnakeGame) -> Self {
        Self::new(NodeId::NONE, None, state)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: Action, state: SnakeGame) -> Self {
        Self::new(parent, Some(action), state)
    }

    fn new(parent: NodeId, action: Option<Action>, state: SnakeGame) -> Self {
        let untried = state.legal_actions();
        Self {
            parent,
            action,
            state,
            untried,
            children: Vec::new(),
            visit_count: 0,
            value_sum: 0.0,
        }
    }

    /// Calculate mean value Q(s,a) = value_sum / visit_count.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }

    /// UCB1 score used by the parent to pick among its children.
    ///
    /// UCB1 = Q + c * sqrt(2 * ln(max(1, N_parent)) / N)
    ///
    /// Unvisited children score +infinity so they are always tried first.
    #[inline]
    pub fn ucb1_score(&self, parent_visits: u32, c_param: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let log_parent = (parent_visits.max(1) as f32).ln();
        let exploration = c_param * (2.0 * log_parent / self.visit_count as f32).sqrt();
        self.mean_value() + exploration
    }

    /// No untried actions remain.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether the snapshot is a finished game.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_done()
    }
}

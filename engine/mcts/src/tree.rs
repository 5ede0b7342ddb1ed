//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! Parent links are indices, so the tree owns every node exactly once and is
//! dropped as a whole after each decision.

use games_snake::{Action, SnakeGame};

use crate::node::{NodeId, SearchNode};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree {
    /// Arena storing all nodes
    nodes: Vec<SearchNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

/// Visit statistics for one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats {
    pub action: Action,
    pub visits: u32,
    pub mean_value: f32,
}

impl SearchTree {
    /// Create a new tree rooted at the given state.
    pub fn new(root_state: SnakeGame) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Restrict the root to exploring exactly these actions.
    pub fn restrict_root(&mut self, actions: &[Action]) {
        let root = self.root;
        self.get_mut(root).untried = actions.to_vec();
    }

    /// Select the child of a node with the highest UCB1 score.
    /// Ties go to the child expanded first.
    pub fn select_child(&self, node_id: NodeId, c_param: f32) -> Option<(Action, NodeId)> {
        let node = self.get(node_id);
        let parent_visits = node.visit_count;

        let mut best: Option<(Action, NodeId)> = None;
        let mut best_score = f32::NEG_INFINITY;
        for &(action, child_id) in &node.children {
            let score = self.get(child_id).ucb1_score(parent_visits, c_param);
            if best.is_none() || score > best_score {
                best_score = score;
                best = Some((action, child_id));
            }
        }
        best
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, action: Action, state: SnakeGame) -> NodeId {
        let child = SearchNode::new_child(parent_id, action, state);
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push((action, child_id));

        child_id
    }

    /// Backpropagate a value from a leaf to the root.
    /// The same value is added at every level; snake is a single-agent game.
    pub fn backpropagate(&mut self, leaf_id: NodeId, value: f32) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.value_sum += value;
            current_id = node.parent;
        }
    }

    /// Root child with the highest mean value.
    /// Returns (action, mean_value) or None if root has no children.
    pub fn best_action(&self) -> Option<(Action, f32)> {
        let root = self.get(self.root);

        let mut best: Option<(Action, f32)> = None;
        for &(action, child_id) in &root.children {
            let mean = self.get(child_id).mean_value();
            match best {
                Some((_, best_mean)) if mean <= best_mean => {}
                _ => best = Some((action, mean)),
            }
        }
        best
    }

    /// Per-action statistics for the root's children, in expansion order.
    pub fn root_children(&self) -> Vec<ChildStats> {
        self.get(self.root)
            .children
            .iter()
            .map(|&(action, id)| {
                let child = self.get(id);
                ChildStats {
                    action,
                    visits: child.visit_count,
                    mean_value: child.mean_value(),
                }
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f32,
    pub max_depth: u32,
}

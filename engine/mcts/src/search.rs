//! MCTS search implementation.
//!
//! Implements the core MCTS loop:
//! 1. Selection: descend through fully expanded nodes by UCB1
//! 2. Expansion: try one random untried action at the reached node
//! 3. Simulation: evaluate the new leaf with a rollout
//! 4. Backpropagation: add the rollout value at every node up to the root

use games_snake::{Action, SnakeGame};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::trace;

use crate::config::MctsConfig;
use crate::evaluator::Evaluator;
use crate::node::NodeId;
use crate::rollout::GuidedRollout;
use crate::tree::{ChildStats, SearchTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Cannot search from a finished game")]
    TerminalState,

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Counters collected over one search.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total game steps simulated by rollouts.
    pub rollout_steps: u64,

    /// Rollouts that ended in a finished game.
    pub terminal_rollouts: u32,

    /// Simulations whose selection stopped at a finished game.
    pub terminal_leaves: u32,

    pub total_nodes: usize,
    pub max_depth: u32,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Root action with the highest mean value
    pub action: Action,

    /// Mean rollout value of the chosen action
    pub value: f32,

    /// Number of simulations performed
    pub simulations: u32,

    /// Visit statistics for every expanded root action, in expansion order
    pub children: Vec<ChildStats>,

    pub stats: SearchStats,
}

/// MCTS search state.
pub struct MctsSearch<'a, E: Evaluator> {
    tree: SearchTree,
    evaluator: &'a E,
    config: MctsConfig,
    stats: SearchStats,
}

impl<'a, E: Evaluator> MctsSearch<'a, E> {
    /// Create a new MCTS search rooted at a copy of `state`.
    ///
    /// `forced_actions` replaces the root's untried actions, restricting the
    /// search to that set.
    pub fn new(
        evaluator: &'a E,
        config: MctsConfig,
        state: &SnakeGame,
        forced_actions: Option<&[Action]>,
    ) -> Result<Self, SearchError> {
        if state.is_done() {
            return Err(SearchError::TerminalState);
        }

        let mut tree = SearchTree::new(state.clone());
        if let Some(actions) = forced_actions {
            tree.restrict_root(actions);
        }
        if tree.get(tree.root()).untried.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            tree,
            evaluator,
            config,
            stats: SearchStats::default(),
        })
    }

    /// Run the MCTS search for the configured number of simulations.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        for _ in 0..self.config.num_simulations {
            self.simulate(rng);
        }

        let (action, value) = self.tree.best_action().ok_or(SearchError::NoLegalMoves)?;
        let tree_stats: TreeStats = self.tree.stats();
        self.stats.total_nodes = tree_stats.total_nodes;
        self.stats.max_depth = tree_stats.max_depth;

        Ok(SearchResult {
            action,
            value,
            simulations: tree_stats.root_visits,
            children: self.tree.root_children(),
            stats: self.stats.clone(),
        })
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) {
        let mut node_id = self.select();

        // Expansion
        let node = self.tree.get(node_id);
        if !node.untried.is_empty() && !node.is_terminal() {
            let index = rng.gen_range(0..node.untried.len());
            let mut state = node.state.clone();
            let action = self.tree.get_mut(node_id).untried.remove(index);
            state.advance(action);
            node_id = self.tree.add_child(node_id, action, state);
        }

        // Simulation
        let leaf = self.tree.get(node_id);
        if leaf.is_terminal() {
            self.stats.terminal_leaves += 1;
        }
        let evaluation = self.evaluator.evaluate(leaf.state.clone(), rng);
        self.stats.rollout_steps += u64::from(evaluation.steps);
        if evaluation.terminal {
            self.stats.terminal_rollouts += 1;
        }

        // Backpropagation
        self.tree.backpropagate(node_id, evaluation.value);

        trace!(
            leaf = node_id.0,
            value = evaluation.value,
            rollout_steps = evaluation.steps,
            "MCTS simulation complete"
        );
    }

    /// Descend while the current node is fully expanded and has children.
    ///
    /// Each node stores the state reached by its action, and food placement
    /// replays identically from a cloned game, so the leaf's snapshot is the
    /// state the simulation would reach by stepping down the path.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if !node.is_fully_expanded() || !node.is_expanded() {
                break;
            }

            match self.tree.select_child(current, self.config.c_param) {
                Some((_, child_id)) => current = child_id,
                None => break,
            }
        }

        current
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }
}

/// Convenience function: run one guided-rollout search and pick a move.
pub fn choose(
    config: &MctsConfig,
    state: &SnakeGame,
    forced_actions: Option<&[Action]>,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let evaluator = GuidedRollout::new(config);
    let mut search = MctsSearch::new(&evaluator, config.clone(), state, forced_actions)?;
    search.run(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::ScoreEvaluator;
    use games_snake::Point;
    use rand::SeedableRng;

    fn game(body: &[(i32, i32)], food: (i32, i32), direction: Action) -> SnakeGame {
        SnakeGame::with_snake(10, 10, body.iter().copied(), food.into(), direction, 42).unwrap()
    }

    #[test]
    fn test_mcts_basic_search() {
        let state = SnakeGame::new(12, 12, 42).unwrap();
        let config = MctsConfig::for_testing();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let result = choose(&config, &state, None, &mut rng).unwrap();

        assert!(state.legal_actions().contains(&result.action));
        assert_eq!(result.simulations, config.num_simulations);
        assert_eq!(result.children.len(), 4);
        let visits: u32 = result.children.iter().map(|c| c.visits).sum();
        assert_eq!(visits, config.num_simulations);
        assert!(result.stats.rollout_steps > 0);
        assert!(result.stats.total_nodes > 4);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let state = SnakeGame::new(12, 12, 7).unwrap();
        let config = MctsConfig::for_testing();

        let first = choose(&config, &state, None, &mut ChaCha20Rng::seed_from_u64(5)).unwrap();
        for _ in 0..3 {
            let again =
                choose(&config, &state, None, &mut ChaCha20Rng::seed_from_u64(5)).unwrap();
            assert_eq!(again.action, first.action);
            assert_eq!(again.value, first.value);
            assert_eq!(again.children, first.children);
        }
    }

    #[test]
    fn test_search_does_not_mutate_state() {
        let state = game(&[(5, 5), (5, 6)], (2, 2), Action::Up);
        let before = state.clone();
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        choose(&MctsConfig::for_testing(), &state, None, &mut rng).unwrap();

        assert_eq!(state.snake(), before.snake());
        assert_eq!(state.food(), before.food());
        assert_eq!(state.score(), before.score());
    }

    #[test]
    fn test_forced_actions_respected() {
        let state = SnakeGame::new(12, 12, 3).unwrap();
        let config = MctsConfig::for_testing();

        for seed in 0..5 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let result = choose(&config, &state, Some(&[Action::Left]), &mut rng).unwrap();
            assert_eq!(result.action, Action::Left);
            assert_eq!(result.children.len(), 1);

            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let forced = [Action::Down, Action::Right];
            let result = choose(&config, &state, Some(&forced), &mut rng).unwrap();
            assert!(forced.contains(&result.action));
        }
    }

    #[test]
    fn test_terminal_state_is_an_error() {
        let mut state = game(&[(0, 0)], (5, 5), Action::Up);
        state.advance(Action::Up);
        assert!(state.is_done());

        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = choose(&MctsConfig::for_testing(), &state, None, &mut rng).unwrap_err();
        assert_eq!(err, SearchError::TerminalState);
    }

    #[test]
    fn test_empty_forced_set_is_an_error() {
        let state = SnakeGame::new(8, 8, 0).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = choose(&MctsConfig::for_testing(), &state, Some(&[]), &mut rng).unwrap_err();
        assert_eq!(err, SearchError::NoLegalMoves);
    }

    #[test]
    fn test_zero_simulations_has_no_answer() {
        let state = SnakeGame::new(8, 8, 0).unwrap();
        let config = MctsConfig::for_testing().with_simulations(0);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(
            choose(&config, &state, None, &mut rng).unwrap_err(),
            SearchError::NoLegalMoves
        );
    }

    #[test]
    fn test_prefers_eating_move() {
        // Food directly to the right; only that child scores a point.
        let state = game(&[(4, 4), (4, 5)], (5, 4), Action::Up);
        let evaluator = ScoreEvaluator;
        let config = MctsConfig::for_testing().with_simulations(30);
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        let mut search = MctsSearch::new(&evaluator, config, &state, None).unwrap();
        let result = search.run(&mut rng).unwrap();

        // Every state below the eating move has scored at least once.
        assert_eq!(result.action, Action::Right);
        assert!(result.value >= 1.0 - 1e-6);
    }

    #[test]
    fn test_guided_search_avoids_wall() {
        // Head against the left wall: moving left is fatal.
        let state = game(&[(0, 5), (1, 5), (2, 5)], (7, 2), Action::Left);
        let config = MctsConfig::for_testing().with_simulations(100);

        for seed in 0..3 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let result = choose(&config, &state, None, &mut rng).unwrap();
            assert_ne!(result.action, Action::Left);
        }
    }

    #[test]
    fn test_tree_grows_below_root() {
        let state = SnakeGame::new(10, 10, 11).unwrap();
        let evaluator = GuidedRollout::new(&MctsConfig::for_testing());
        let mut search =
            MctsSearch::new(&evaluator, MctsConfig::for_testing(), &state, None).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let result = search.run(&mut rng).unwrap();

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert!(root.is_fully_expanded());
        assert_eq!(root.visit_count, result.simulations);
        assert!(result.stats.max_depth >= 2);
        assert_eq!(tree.len(), result.stats.total_nodes);
    }

    #[test]
    fn test_children_hold_stepped_state() {
        let state = game(&[(5, 5)], (1, 1), Action::Up);
        let evaluator = ScoreEvaluator;
        let config = MctsConfig::for_testing().with_simulations(4);
        let mut search = MctsSearch::new(&evaluator, config, &state, None).unwrap();
        search.run(&mut ChaCha20Rng::seed_from_u64(0)).unwrap();

        let tree = search.tree();
        for &(action, child_id) in &tree.get(tree.root()).children {
            assert_eq!(
                tree.get(child_id).state.head(),
                Point::new(5, 5).step(action)
            );
        }
    }
}

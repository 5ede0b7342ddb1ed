//! Per-turn move selection
//!
//! Each turn the agent first looks for a shortest path to the food (with the
//! tail treated as free). A short path whose first move is safe is followed
//! directly; otherwise the move comes from an MCTS search restricted to the
//! safe moves.

use games_snake::{find_path_to_food, safe_actions, Action, SnakeGame};
use mcts::{choose, MctsConfig, SearchError};
use rand_chacha::ChaCha20Rng;
use std::time::Instant;
use tracing::debug;

/// Tunables for the shortest-path versus search switch.
#[derive(Debug, Clone)]
pub struct PolicySettings {
    pub mcts: MctsConfig,
    /// Longest path followed without searching
    pub path_threshold: usize,
    /// Maximum BFS dequeues per turn
    pub bfs_node_budget: usize,
}

/// Where a move came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionSource {
    /// First step of a BFS path of the given length
    ShortestPath { length: usize },
    /// Best root action of an MCTS search
    Search {
        value: f32,
        simulations: u32,
        elapsed_us: u64,
    },
}

/// The move chosen for one turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub source: DecisionSource,
}

/// Shortest-path-first move selector with an MCTS fallback.
pub struct TurnPolicy {
    settings: PolicySettings,
    rng: ChaCha20Rng,
}

impl TurnPolicy {
    pub fn new(settings: PolicySettings, rng: ChaCha20Rng) -> Self {
        Self { settings, rng }
    }

    /// Choose the next move for `game`.
    pub fn decide(&mut self, game: &SnakeGame) -> Result<Decision, SearchError> {
        let safe = safe_actions(game);

        if let Some(path) = find_path_to_food(game, true, self.settings.bfs_node_budget) {
            if let Some(&first) = path.first() {
                if path.len() <= self.settings.path_threshold && safe.contains(&first) {
                    debug!(
                        action = ?first,
                        path_len = path.len(),
                        "following shortest path"
                    );
                    return Ok(Decision {
                        action: first,
                        source: DecisionSource::ShortestPath { length: path.len() },
                    });
                }
            }
        }

        let start = Instant::now();
        let result = choose(&self.settings.mcts, game, Some(&safe), &mut self.rng)?;
        let elapsed_us = start.elapsed().as_micros() as u64;

        debug!(
            action = ?result.action,
            value = result.value,
            simulations = result.simulations,
            nodes = result.stats.total_nodes,
            elapsed_us,
            "search decision"
        );

        Ok(Decision {
            action: result.action,
            source: DecisionSource::Search {
                value: result.value,
                simulations: result.simulations,
                elapsed_us,
            },
        })
    }
}

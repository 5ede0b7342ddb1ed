//! Food-guided rollout policy with reward shaping.
//!
//! Each rollout step prefers moves that avoid an immediate collision and,
//! with probability `guided_prob`, takes the safe move that ends closest to
//! the food. Before every step the rollout adds a small shaped reward for
//! progress toward the food and for free space around the new head, and a
//! penalty for re-entering a cell it already visited.

use std::collections::HashSet;

use games_snake::{manhattan_distance, safe_subset, Action, Point, SnakeGame};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::config::MctsConfig;
use crate::evaluator::{Evaluation, Evaluator};

/// Reward per unit of Manhattan distance gained toward the food.
pub const PROGRESS_WEIGHT: f32 = 0.08;

/// Penalty for moving into a cell already visited during this rollout.
pub const REVISIT_PENALTY: f32 = 0.05;

/// Boards with at most this fraction of free cells count as crowded.
pub const CROWDED_FREE_FRACTION: f64 = 0.4;

/// Rollout depth multiplier on crowded boards.
pub const CROWDED_DEPTH_SCALE: f64 = 1.4;

/// Guided rollout evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidedRollout {
    pub rollout_depth: u32,
    pub guided_prob: f32,
    pub open_space_weight: f32,
}

impl GuidedRollout {
    pub fn new(config: &MctsConfig) -> Self {
        Self {
            rollout_depth: config.rollout_depth,
            guided_prob: config.guided_prob,
            open_space_weight: config.open_space_weight,
        }
    }

    /// Step limit for a rollout starting from `state`.
    pub fn dynamic_depth(&self, state: &SnakeGame) -> u32 {
        let cells = state.cell_count() as f64;
        let free = state.free_cell_count() as f64;
        if free > cells * CROWDED_FREE_FRACTION {
            self.rollout_depth
        } else {
            (self.rollout_depth as f64 * CROWDED_DEPTH_SCALE) as u32
        }
    }

    /// Pick the next rollout action.
    fn pick(&self, state: &SnakeGame, rng: &mut ChaCha20Rng) -> Option<Action> {
        let legal = state.legal_actions();
        let safe = safe_subset(state, &legal);
        if safe.is_empty() {
            return legal.choose(rng).copied();
        }

        if rng.gen::<f32>() < self.guided_prob {
            let head = state.head();
            let food = state.food();
            safe.iter()
                .copied()
                .min_by_key(|&a| manhattan_distance(head.step(a), food))
        } else {
            safe.choose(rng).copied()
        }
    }

    /// Shaped reward for moving the head from its current cell to `next`.
    fn shaping(&self, state: &SnakeGame, next: Point, visited: &mut HashSet<Point>) -> f32 {
        let food = state.food();
        let gained = manhattan_distance(state.head(), food) - manhattan_distance(next, food);

        let mut reward = PROGRESS_WEIGHT * gained as f32;
        reward += self.open_space_weight * free_neighbours(state, next) as f32;
        if !visited.insert(next) {
            reward -= REVISIT_PENALTY;
        }
        reward
    }
}

impl Evaluator for GuidedRollout {
    fn evaluate(&self, mut state: SnakeGame, rng: &mut ChaCha20Rng) -> Evaluation {
        let depth = self.dynamic_depth(&state);
        let mut visited = HashSet::new();
        let mut total = 0.0f32;
        let mut steps = 0u32;

        while !state.is_done() && steps < depth {
            let Some(action) = self.pick(&state, rng) else {
                break;
            };
            let next = state.head().step(action);
            total += self.shaping(&state, next, &mut visited);
            total += state.advance(action).reward;
            steps += 1;
        }

        trace!(
            steps,
            depth,
            value = total,
            terminal = state.is_done(),
            "rollout complete"
        );

        Evaluation {
            value: total,
            steps,
            terminal: state.is_done(),
        }
    }
}

/// In-bounds 4-neighbours of `cell` that are not on the snake.
fn free_neighbours(state: &SnakeGame, cell: Point) -> usize {
    Action::ALL
        .iter()
        .map(|&a| cell.step(a))
        .filter(|&p| state.in_bounds(p) && !state.occupies(p))
        .count()
}

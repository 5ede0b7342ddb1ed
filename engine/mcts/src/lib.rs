//! Monte Carlo Tree Search (MCTS) for choosing snake moves.
//!
//! The search builds a tree over [`SnakeGame`](games_snake::SnakeGame)
//! snapshots. Each simulation consists of four phases:
//!
//! 1. **Selection**: descend through fully expanded nodes by UCB1, balancing
//!    exploration and exploitation
//! 2. **Expansion**: expand one random untried action of the reached node
//! 3. **Simulation**: play a food-guided rollout from the new node and
//!    accumulate its shaped reward
//! 4. **Backpropagation**: add one visit and the rollout value to every node
//!    on the path back to the root
//!
//! The move returned is the root child with the highest mean value.
//!
//! # Usage
//!
//! ```rust
//! use games_snake::SnakeGame;
//! use mcts::{choose, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = SnakeGame::new(12, 12, 42).unwrap();
//! let config = MctsConfig::for_testing();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = choose(&config, &game, None, &mut rng).unwrap();
//! assert!(game.legal_actions().contains(&result.action));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: simulations per decision (default: 300)
//! - `rollout_depth`: base rollout length, scaled by 1.4 on crowded boards
//!   (default: 150)
//! - `c_param`: UCB1 exploration constant (default: 1.4)
//! - `guided_prob`: chance a rollout step heads for the food (default: 0.85)
//! - `open_space_weight`: shaping per free neighbour (default: 0.02)
//!
//! # Evaluators
//!
//! Leaves are scored by an [`Evaluator`]. [`GuidedRollout`] is the one the
//! agent plays with; [`ScoreEvaluator`] scores by game score alone and is
//! handy for testing the tree without rollout noise.

pub mod config;
pub mod evaluator;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use evaluator::{Evaluation, Evaluator, ScoreEvaluator};
pub use node::{NodeId, SearchNode};
pub use rollout::GuidedRollout;
pub use search::{choose, MctsSearch, SearchError, SearchResult, SearchStats};
pub use tree::{ChildStats, SearchTree, TreeStats};

//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the snake agent binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`SNAKE_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! SNAKE_<SECTION>_<KEY>=value
//!
//! Examples:
//!     SNAKE_COMMON_SEED=7
//!     SNAKE_GAME_WIDTH=20
//!     SNAKE_MCTS_SIMULATIONS=600
//!     SNAKE_POLICY_PATH_THRESHOLD=30
//!     SNAKE_ACTOR_RENDER=true
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_ENV, CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;

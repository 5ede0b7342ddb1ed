//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time, so the binary carries the
//! same values the checked-in file documents.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    game: GameDefaults,
    mcts: MctsDefaults,
    policy: PolicyDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    data_dir: String,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    simulations: u32,
    rollout_depth: u32,
    c_param: f64,
    guided_prob: f64,
    open_space_weight: f64,
    trap_penalty: f64,
    serpentine_bonus: f64,
}

#[derive(Debug, Deserialize)]
struct PolicyDefaults {
    path_threshold: usize,
    bfs_node_budget: usize,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    episodes: u32,
    max_steps: u32,
    log_interval: u32,
    render: bool,
    step_delay_ms: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}

// Game
pub fn width() -> u32 {
    DEFAULTS.game.width
}
pub fn height() -> u32 {
    DEFAULTS.game.height
}

// MCTS
pub fn simulations() -> u32 {
    DEFAULTS.mcts.simulations
}
pub fn rollout_depth() -> u32 {
    DEFAULTS.mcts.rollout_depth
}
pub fn c_param() -> f64 {
    DEFAULTS.mcts.c_param
}
pub fn guided_prob() -> f64 {
    DEFAULTS.mcts.guided_prob
}
pub fn open_space_weight() -> f64 {
    DEFAULTS.mcts.open_space_weight
}
pub fn trap_penalty() -> f64 {
    DEFAULTS.mcts.trap_penalty
}
pub fn serpentine_bonus() -> f64 {
    DEFAULTS.mcts.serpentine_bonus
}

// Policy
pub fn path_threshold() -> usize {
    DEFAULTS.policy.path_threshold
}
pub fn bfs_node_budget() -> usize {
    DEFAULTS.policy.bfs_node_budget
}

// Actor
pub fn episodes() -> u32 {
    DEFAULTS.actor.episodes
}
pub fn max_steps() -> u32 {
    DEFAULTS.actor.max_steps
}
pub fn log_interval() -> u32 {
    DEFAULTS.actor.log_interval
}
pub fn render() -> bool {
    DEFAULTS.actor.render
}
pub fn step_delay_ms() -> u64 {
    DEFAULTS.actor.step_delay_ms
}

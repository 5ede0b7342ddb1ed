//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_width() -> u32 {
    defaults::width()
}
fn d_height() -> u32 {
    defaults::height()
}
fn d_simulations() -> u32 {
    defaults::simulations()
}
fn d_rollout_depth() -> u32 {
    defaults::rollout_depth()
}
fn d_c_param() -> f64 {
    defaults::c_param()
}
fn d_guided_prob() -> f64 {
    defaults::guided_prob()
}
fn d_open_space_weight() -> f64 {
    defaults::open_space_weight()
}
fn d_trap_penalty() -> f64 {
    defaults::trap_penalty()
}
fn d_serpentine_bonus() -> f64 {
    defaults::serpentine_bonus()
}
fn d_path_threshold() -> usize {
    defaults::path_threshold()
}
fn d_bfs_node_budget() -> usize {
    defaults::bfs_node_budget()
}
fn d_episodes() -> u32 {
    defaults::episodes()
}
fn d_max_steps() -> u32 {
    defaults::max_steps()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}
fn d_render() -> bool {
    defaults::render()
}
fn d_step_delay_ms() -> u64 {
    defaults::step_delay_ms()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    /// Base seed; episode `n` plays with `seed + n`
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            data_dir: defaults::data_dir().into(),
            seed: defaults::seed(),
        }
    }
}

/// Board dimensions
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "d_width")]
    pub width: u32,
    #[serde(default = "d_height")]
    pub height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: defaults::width(),
            height: defaults::height(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_simulations")]
    pub simulations: u32,
    #[serde(default = "d_rollout_depth")]
    pub rollout_depth: u32,
    #[serde(default = "d_c_param")]
    pub c_param: f64,
    #[serde(default = "d_guided_prob")]
    pub guided_prob: f64,
    #[serde(default = "d_open_space_weight")]
    pub open_space_weight: f64,
    #[serde(default = "d_trap_penalty")]
    pub trap_penalty: f64,
    #[serde(default = "d_serpentine_bonus")]
    pub serpentine_bonus: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: defaults::simulations(),
            rollout_depth: defaults::rollout_depth(),
            c_param: defaults::c_param(),
            guided_prob: defaults::guided_prob(),
            open_space_weight: defaults::open_space_weight(),
            trap_penalty: defaults::trap_penalty(),
            serpentine_bonus: defaults::serpentine_bonus(),
        }
    }
}

/// Shortest-path versus search switch
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PolicyConfig {
    /// Longest BFS path the agent follows without searching
    #[serde(default = "d_path_threshold")]
    pub path_threshold: usize,
    /// Maximum BFS dequeues per turn
    #[serde(default = "d_bfs_node_budget")]
    pub bfs_node_budget: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            path_threshold: defaults::path_threshold(),
            bfs_node_budget: defaults::bfs_node_budget(),
        }
    }
}

/// Episode runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_episodes")]
    pub episodes: u32,
    #[serde(default = "d_max_steps")]
    pub max_steps: u32,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
    #[serde(default = "d_render")]
    pub render: bool,
    #[serde(default = "d_step_delay_ms")]
    pub step_delay_ms: u64,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            episodes: defaults::episodes(),
            max_steps: defaults::max_steps(),
            log_interval: defaults::log_interval(),
            render: defaults::render(),
            step_delay_ms: defaults::step_delay_ms(),
        }
    }
}

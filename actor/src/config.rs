//! Configuration for the snake-actor binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use crate::turn_policy::PolicySettings;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}
fn default_data_dir() -> String {
    CENTRAL_CONFIG.common.data_dir.clone()
}
fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}
fn default_width() -> u32 {
    CENTRAL_CONFIG.game.width
}
fn default_height() -> u32 {
    CENTRAL_CONFIG.game.height
}
fn default_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.simulations
}
fn default_rollout_depth() -> u32 {
    CENTRAL_CONFIG.mcts.rollout_depth
}
fn default_c_param() -> f32 {
    CENTRAL_CONFIG.mcts.c_param as f32
}
fn default_guided_prob() -> f32 {
    CENTRAL_CONFIG.mcts.guided_prob as f32
}
fn default_open_space_weight() -> f32 {
    CENTRAL_CONFIG.mcts.open_space_weight as f32
}
fn default_trap_penalty() -> f32 {
    CENTRAL_CONFIG.mcts.trap_penalty as f32
}
fn default_serpentine_bonus() -> f32 {
    CENTRAL_CONFIG.mcts.serpentine_bonus as f32
}
fn default_path_threshold() -> usize {
    CENTRAL_CONFIG.policy.path_threshold
}
fn default_bfs_node_budget() -> usize {
    CENTRAL_CONFIG.policy.bfs_node_budget
}
fn default_episodes() -> u32 {
    CENTRAL_CONFIG.actor.episodes
}
fn default_max_steps() -> u32 {
    CENTRAL_CONFIG.actor.max_steps
}
fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.actor.log_interval
}
fn default_render() -> bool {
    CENTRAL_CONFIG.actor.render
}
fn default_step_delay_ms() -> u64 {
    CENTRAL_CONFIG.actor.step_delay_ms
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "snake-actor")]
#[command(about = "Snake agent - plays episodes with shortest-path moves and MCTS")]
#[command(
    long_about = "Plays snake episodes. Each turn follows the shortest path to the food when
it is short enough, and otherwise runs a Monte Carlo Tree Search restricted to
moves that avoid an immediate collision.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Directory for the run statistics file
    #[arg(long, default_value_t = default_data_dir())]
    pub data_dir: String,

    /// Base seed; episode N plays with seed + N
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Board width in cells
    #[arg(long, default_value_t = default_width())]
    pub width: u32,

    /// Board height in cells
    #[arg(long, default_value_t = default_height())]
    pub height: u32,

    /// Number of MCTS simulations per searched move
    #[arg(long, default_value_t = default_simulations())]
    pub simulations: u32,

    /// Base rollout length in steps
    #[arg(long, default_value_t = default_rollout_depth())]
    pub rollout_depth: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_c_param())]
    pub c_param: f32,

    /// Probability that a rollout step heads for the food
    #[arg(long, default_value_t = default_guided_prob())]
    pub guided_prob: f32,

    /// Rollout shaping weight per free neighbour of the new head
    #[arg(long, default_value_t = default_open_space_weight())]
    pub open_space_weight: f32,

    /// Accepted for tuning front ends; not applied by the search
    #[arg(long, default_value_t = default_trap_penalty())]
    pub trap_penalty: f32,

    /// Accepted for tuning front ends; not applied by the search
    #[arg(long, default_value_t = default_serpentine_bonus())]
    pub serpentine_bonus: f32,

    /// Follow the BFS path when it is at most this many moves long
    #[arg(long, default_value_t = default_path_threshold())]
    pub path_threshold: usize,

    /// Maximum BFS dequeues per turn
    #[arg(long, default_value_t = default_bfs_node_budget())]
    pub bfs_node_budget: usize,

    /// Number of episodes to play
    #[arg(long, default_value_t = default_episodes())]
    pub episodes: u32,

    /// Step cap per episode
    #[arg(long, default_value_t = default_max_steps())]
    pub max_steps: u32,

    /// Log progress every N episodes (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Print the board to stdout after every move
    #[arg(long, action = clap::ArgAction::Set, default_value_t = default_render())]
    pub render: bool,

    /// Pause between rendered moves in milliseconds
    #[arg(long, default_value_t = default_step_delay_ms())]
    pub step_delay_ms: u64,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(anyhow!(
                "board must be at least 1x1, got {}x{}",
                self.width,
                self.height
            ));
        }

        if self.simulations == 0 {
            return Err(anyhow!("simulations must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&self.guided_prob) {
            return Err(anyhow!(
                "guided_prob must be within [0, 1], got {}",
                self.guided_prob
            ));
        }

        if self.c_param < 0.0 || !self.c_param.is_finite() {
            return Err(anyhow!(
                "c_param must be a non-negative number, got {}",
                self.c_param
            ));
        }

        if self.bfs_node_budget == 0 {
            return Err(anyhow!("bfs_node_budget must be greater than 0"));
        }

        if self.max_steps == 0 {
            return Err(anyhow!("max_steps must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Search parameters for the MCTS fallback.
    pub fn mcts_config(&self) -> mcts::MctsConfig {
        mcts::MctsConfig::default()
            .with_simulations(self.simulations)
            .with_rollout_depth(self.rollout_depth)
            .with_c_param(self.c_param)
            .with_guided_prob(self.guided_prob)
            .with_open_space_weight(self.open_space_weight)
            .with_trap_penalty(self.trap_penalty)
            .with_serpentine_bonus(self.serpentine_bonus)
    }

    pub fn policy_settings(&self) -> PolicySettings {
        PolicySettings {
            mcts: self.mcts_config(),
            path_threshold: self.path_threshold,
            bfs_node_budget: self.bfs_node_budget,
        }
    }

    /// Seed for the given zero-based episode.
    pub fn episode_seed(&self, episode: u32) -> u64 {
        self.seed.wrapping_add(u64::from(episode))
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Path of the JSON statistics snapshot
    pub fn stats_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("actor_stats.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            log_level: "info".into(),
            data_dir: "../data".into(),
            seed: 42,
            width: 12,
            height: 12,
            simulations: 300,
            rollout_depth: 150,
            c_param: 1.4,
            guided_prob: 0.85,
            open_space_weight: 0.02,
            trap_penalty: 0.15,
            serpentine_bonus: 0.03,
            path_threshold: 20,
            bfs_node_budget: 10_000,
            episodes: 1,
            max_steps: 5000,
            log_interval: 10,
            render: false,
            step_delay_ms: 0,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_sized_board() {
        let mut cfg = base_config();
        cfg.height = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("board"));
    }

    #[test]
    fn validate_rejects_zero_simulations() {
        let mut cfg = base_config();
        cfg.simulations = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("simulations"));
    }

    #[test]
    fn validate_rejects_out_of_range_probability() {
        let mut cfg = base_config();
        cfg.guided_prob = 1.5;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("guided_prob"));

        cfg.guided_prob = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_probability_bounds() {
        let mut cfg = base_config();
        cfg.guided_prob = 0.0;
        assert!(cfg.validate().is_ok());
        cfg.guided_prob = 1.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_c_param() {
        let mut cfg = base_config();
        cfg.c_param = -1.0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("c_param"));
    }

    #[test]
    fn validate_rejects_zero_bfs_budget() {
        let mut cfg = base_config();
        cfg.bfs_node_budget = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("bfs_node_budget"));
    }

    #[test]
    fn validate_rejects_zero_max_steps() {
        let mut cfg = base_config();
        cfg.max_steps = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_steps"));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn mcts_config_carries_cli_values() {
        let mut cfg = base_config();
        cfg.simulations = 77;
        cfg.guided_prob = 0.5;
        let mcts = cfg.mcts_config();
        assert_eq!(mcts.num_simulations, 77);
        assert_eq!(mcts.rollout_depth, 150);
        assert!((mcts.guided_prob - 0.5).abs() < 1e-6);
        assert!((mcts.serpentine_bonus - 0.03).abs() < 1e-6);
    }

    #[test]
    fn episode_seed_offsets_base_seed() {
        let mut cfg = base_config();
        assert_eq!(cfg.episode_seed(0), 42);
        assert_eq!(cfg.episode_seed(3), 45);

        cfg.seed = u64::MAX;
        assert_eq!(cfg.episode_seed(1), 0);
    }

    #[test]
    fn step_delay_returns_correct_duration() {
        let mut cfg = base_config();
        cfg.step_delay_ms = 250;
        assert_eq!(cfg.step_delay(), Duration::from_millis(250));
    }

    #[test]
    fn stats_path_constructs_correctly() {
        let cfg = base_config();
        assert_eq!(cfg.stats_path(), PathBuf::from("../data/actor_stats.json"));
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cfg = Config::parse_from([
            "snake-actor",
            "--width",
            "20",
            "--simulations",
            "50",
            "--render",
            "true",
        ]);
        assert_eq!(cfg.width, 20);
        assert_eq!(cfg.simulations, 50);
        assert!(cfg.render);
    }
}

//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "SNAKE_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the SNAKE_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_ENV, path.display());
            return load_from_path(path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_ENV,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Unreadable or unparseable files fall back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: SNAKE_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "SNAKE_COMMON_LOG_LEVEL");
    env_override!(config, common.data_dir, "SNAKE_COMMON_DATA_DIR");
    env_override!(config, common.seed, "SNAKE_COMMON_SEED", parse);

    // Game
    env_override!(config, game.width, "SNAKE_GAME_WIDTH", parse);
    env_override!(config, game.height, "SNAKE_GAME_HEIGHT", parse);

    // MCTS
    env_override!(config, mcts.simulations, "SNAKE_MCTS_SIMULATIONS", parse);
    env_override!(
        config,
        mcts.rollout_depth,
        "SNAKE_MCTS_ROLLOUT_DEPTH",
        parse
    );
    env_override!(config, mcts.c_param, "SNAKE_MCTS_C_PARAM", parse);
    env_override!(config, mcts.guided_prob, "SNAKE_MCTS_GUIDED_PROB", parse);
    env_override!(
        config,
        mcts.open_space_weight,
        "SNAKE_MCTS_OPEN_SPACE_WEIGHT",
        parse
    );
    env_override!(
        config,
        mcts.trap_penalty,
        "SNAKE_MCTS_TRAP_PENALTY",
        parse
    );
    env_override!(
        config,
        mcts.serpentine_bonus,
        "SNAKE_MCTS_SERPENTINE_BONUS",
        parse
    );

    // Policy
    env_override!(
        config,
        policy.path_threshold,
        "SNAKE_POLICY_PATH_THRESHOLD",
        parse
    );
    env_override!(
        config,
        policy.bfs_node_budget,
        "SNAKE_POLICY_BFS_NODE_BUDGET",
        parse
    );

    // Actor
    env_override!(config, actor.episodes, "SNAKE_ACTOR_EPISODES", parse);
    env_override!(config, actor.max_steps, "SNAKE_ACTOR_MAX_STEPS", parse);
    env_override!(
        config,
        actor.log_interval,
        "SNAKE_ACTOR_LOG_INTERVAL",
        parse
    );
    env_override!(config, actor.render, "SNAKE_ACTOR_RENDER", parse);
    env_override!(
        config,
        actor.step_delay_ms,
        "SNAKE_ACTOR_STEP_DELAY_MS",
        parse
    );

    config
}

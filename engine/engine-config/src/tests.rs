//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.data_dir, "./data");
    assert_eq!(config.common.seed, 42);
    assert_eq!(config.game.width, 12);
    assert_eq!(config.game.height, 12);
    assert_eq!(config.actor.episodes, 1);
    assert_eq!(config.actor.max_steps, 5000);
    assert!(!config.actor.render);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.mcts.simulations, 300);
    assert_eq!(config.mcts.rollout_depth, 150);
    assert!((config.mcts.c_param - 1.4).abs() < f64::EPSILON);
    assert!((config.mcts.guided_prob - 0.85).abs() < f64::EPSILON);
    assert!((config.mcts.open_space_weight - 0.02).abs() < f64::EPSILON);
    assert!((config.mcts.trap_penalty - 0.15).abs() < f64::EPSILON);
    assert!((config.mcts.serpentine_bonus - 0.03).abs() < f64::EPSILON);
}

#[test]
fn test_policy_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.policy.path_threshold, 20);
    assert_eq!(config.policy.bfs_node_budget, 10_000);
}

#[test]
fn test_env_overrides() {
    std::env::set_var("SNAKE_GAME_WIDTH", "20");
    std::env::set_var("SNAKE_MCTS_GUIDED_PROB", "0.5");
    std::env::set_var("SNAKE_ACTOR_RENDER", "true");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.game.width, 20);
    assert!((config.mcts.guided_prob - 0.5).abs() < f64::EPSILON);
    assert!(config.actor.render);

    std::env::remove_var("SNAKE_GAME_WIDTH");
    std::env::remove_var("SNAKE_MCTS_GUIDED_PROB");
    std::env::remove_var("SNAKE_ACTOR_RENDER");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("SNAKE_POLICY_PATH_THRESHOLD", "twenty");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.policy.path_threshold, 20);

    std::env::remove_var("SNAKE_POLICY_PATH_THRESHOLD");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
data_dir = "/custom/data"
seed = 7

[game]
width = 16
height = 9

[mcts]
simulations = 600
c_param = 2.0

[policy]
path_threshold = 35
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.data_dir, "/custom/data");
    assert_eq!(config.common.seed, 7);
    assert_eq!(config.game.width, 16);
    assert_eq!(config.game.height, 9);
    assert_eq!(config.mcts.simulations, 600);
    assert!((config.mcts.c_param - 2.0).abs() < f64::EPSILON);
    assert_eq!(config.policy.path_threshold, 35);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[game]
width = 8
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.game.width, 8);
    assert_eq!(config.game.height, 12); // Default
    assert_eq!(config.common.log_level, "info"); // Default
    assert_eq!(config.mcts.rollout_depth, 150); // Default
    assert_eq!(config.policy.bfs_node_budget, 10_000); // Default
}

#[test]
fn test_actor_config_from_toml() {
    let toml_content = r#"
[actor]
episodes = 25
max_steps = 800
render = true
step_delay_ms = 50
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.actor.episodes, 25);
    assert_eq!(config.actor.max_steps, 800);
    assert!(config.actor.render);
    assert_eq!(config.actor.step_delay_ms, 50);
    assert_eq!(config.actor.log_interval, 10); // Default
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[mcts]\nrollout_depth = 40\n\n[game]\nheight = 6").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.mcts.rollout_depth, 40);
    assert_eq!(config.game.height, 6);
}

#[test]
fn test_load_from_invalid_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[mcts\nrollout_depth = ").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.mcts.rollout_depth, 150);
}

#[test]
fn test_load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("absent.toml"));
    assert_eq!(config.common.seed, 42);
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.data_dir, cloned.common.data_dir);
    assert_eq!(config.game.width, cloned.game.width);
}

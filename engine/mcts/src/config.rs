//! MCTS configuration parameters.

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    pub num_simulations: u32,

    /// Base number of steps per rollout.
    /// Scaled up by 1.4 when the board is crowded (free fraction <= 0.4).
    pub rollout_depth: u32,

    /// Exploration constant for the UCB1 formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub c_param: f32,

    /// Probability that a rollout step takes the safe move closest to the food
    /// instead of a uniformly random safe move.
    pub guided_prob: f32,

    /// Shaping weight per free neighbour of the cell the head moves into.
    pub open_space_weight: f32,

    /// Accepted from tuning front ends but not applied to any reward.
    pub trap_penalty: f32,

    /// Accepted from tuning front ends but not applied to any reward.
    pub serpentine_bonus: f32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 300,
            rollout_depth: 150,
            c_param: 1.4,
            guided_prob: 0.85,
            open_space_weight: 0.02,
            trap_penalty: 0.15,
            serpentine_bonus: 0.03,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 60,
            rollout_depth: 30,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set base rollout depth.
    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    /// Builder pattern: set UCB1 exploration constant.
    pub fn with_c_param(mut self, c: f32) -> Self {
        self.c_param = c;
        self
    }

    /// Builder pattern: set the guided rollout probability.
    pub fn with_guided_prob(mut self, p: f32) -> Self {
        self.guided_prob = p;
        self
    }

    /// Builder pattern: set the open-space shaping weight.
    pub fn with_open_space_weight(mut self, w: f32) -> Self {
        self.open_space_weight = w;
        self
    }

    /// Builder pattern: set the (inert) trap penalty.
    pub fn with_trap_penalty(mut self, p: f32) -> Self {
        self.trap_penalty = p;
        self
    }

    /// Builder pattern: set the (inert) serpentine bonus.
    pub fn with_serpentine_bonus(mut self, b: f32) -> Self {
        self.serpentine_bonus = b;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 300);
        assert_eq!(config.rollout_depth, 150);
        assert!((config.c_param - 1.4).abs() < 1e-6);
        assert!((config.guided_prob - 0.85).abs() < 1e-6);
        assert!((config.open_space_weight - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(100)
            .with_rollout_depth(40)
            .with_c_param(0.5)
            .with_guided_prob(1.0);

        assert_eq!(config.num_simulations, 100);
        assert_eq!(config.rollout_depth, 40);
        assert!((config.c_param - 0.5).abs() < 1e-6);
        assert!((config.guided_prob - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_testing_config_is_smaller() {
        let testing = MctsConfig::for_testing();
        let default = MctsConfig::default();
        assert!(testing.num_simulations < default.num_simulations);
        assert!(testing.rollout_depth < default.rollout_depth);
        assert_eq!(testing.c_param, default.c_param);
    }
}

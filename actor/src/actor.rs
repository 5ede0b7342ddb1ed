//! Episode runner driving the turn policy against the snake game

use anyhow::Result;
use games_snake::{SnakeGame, StepEvent};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::stats::{ActorStats, EpisodeEnd, EpisodeOutcome};
use crate::turn_policy::{DecisionSource, TurnPolicy};

pub struct Actor {
    config: Config,
    stats: ActorStats,
}

impl Actor {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        info!(
            width = config.width,
            height = config.height,
            simulations = config.simulations,
            rollout_depth = config.rollout_depth,
            path_threshold = config.path_threshold,
            "Actor configured"
        );

        let stats = ActorStats::new(config.stats_path());
        Ok(Self { config, stats })
    }

    pub fn run(&self) -> Result<()> {
        info!(
            episodes = self.config.episodes,
            seed = self.config.seed,
            render = self.config.render,
            "Actor starting"
        );

        // Progress bar only when stderr is a TTY and the board is not drawn
        let progress = if !self.config.render
            && self.config.episodes > 1
            && std::io::IsTerminal::is_terminal(&std::io::stderr())
        {
            let pb = ProgressBar::new(u64::from(self.config.episodes));
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} episodes ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for episode in 0..self.config.episodes {
            let episode_start = Instant::now();
            let outcome = self.run_episode(episode)?;
            self.stats.record_episode(&outcome);

            let completed = episode + 1;
            let log_episode = || {
                info!(
                    episode = completed,
                    score = outcome.score,
                    steps = outcome.steps,
                    end = ?outcome.end,
                    duration_s = format!("{:.2}", episode_start.elapsed().as_secs_f64()),
                    "Episode finished"
                );
            };

            // Suspend progress bar while logging to avoid visual glitches
            match progress {
                Some(ref pb) => {
                    pb.suspend(log_episode);
                    pb.inc(1);
                }
                None => log_episode(),
            }

            if self.config.log_interval > 0 && completed % self.config.log_interval == 0 {
                let snapshot = self.stats.snapshot();
                info!(
                    "Completed {} episodes (avg score: {:.2}, best: {})",
                    completed, snapshot.avg_score, snapshot.best_score
                );
                self.stats.write_stats();
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        self.stats.write_stats();
        let snapshot = self.stats.snapshot();
        info!(
            episodes = snapshot.episodes_completed,
            avg_score = format!("{:.2}", snapshot.avg_score),
            best_score = snapshot.best_score,
            path_decisions = snapshot.path_decisions,
            search_decisions = snapshot.search_decisions,
            "Actor finished"
        );
        Ok(())
    }

    /// Play one episode to a collision, a full board or the step cap.
    fn run_episode(&self, episode: u32) -> Result<EpisodeOutcome> {
        let seed = self.config.episode_seed(episode);
        let mut game = SnakeGame::new(self.config.width, self.config.height, seed)?;

        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(1);
        let mut policy = TurnPolicy::new(self.config.policy_settings(), rng);

        debug!(episode = episode + 1, seed, "Starting episode");
        if self.config.render {
            self.render(&game);
        }

        let mut steps = 0u32;
        let end = loop {
            if steps >= self.config.max_steps {
                break EpisodeEnd::StepLimit;
            }

            let decision = policy.decide(&game)?;
            self.stats.record_decision(&decision.source);
            match decision.source {
                DecisionSource::ShortestPath { length } => {
                    debug!(step = steps, path_len = length, "move from shortest path");
                }
                DecisionSource::Search {
                    value, simulations, ..
                } => {
                    debug!(step = steps, value, simulations, "move from search");
                }
            }

            let transition = game.advance(decision.action);
            steps += 1;

            if self.config.render {
                self.render(&game);
            }

            match transition.event {
                StepEvent::Collision(kind) => break EpisodeEnd::Collision(kind),
                StepEvent::BoardFilled => break EpisodeEnd::BoardFilled,
                StepEvent::AlreadyOver => break EpisodeEnd::StepLimit,
                StepEvent::Moved | StepEvent::AteFood => {}
            }
        };

        Ok(EpisodeOutcome {
            score: game.score(),
            steps,
            end,
        })
    }

    fn render(&self, game: &SnakeGame) {
        println!("{}", game.observe());
        println!("score: {}", game.score());
        let delay = self.config.step_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Run statistics (for testing)
    #[allow(dead_code)]
    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }
}

//! Run statistics tracking and persistence.
//!
//! This module tracks, across all episodes of a run:
//! - Episode counts, scores and how each episode ended
//! - How many moves came from the shortest path versus the search
//! - Time spent searching
//!
//! Stats are written to a JSON file after each logging interval and at exit.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

use games_snake::Collision;

use crate::turn_policy::DecisionSource;

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    Collision(Collision),
    BoardFilled,
    StepLimit,
}

/// Summary of one finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    pub score: u32,
    pub steps: u32,
    pub end: EpisodeEnd,
}

/// Aggregated run statistics, designed for lock-free updates.
#[derive(Debug)]
pub struct ActorStats {
    episodes_completed: AtomicU32,
    total_score: AtomicU64,
    best_score: AtomicU32,
    /// Total game steps across all episodes
    total_steps: AtomicU64,
    path_decisions: AtomicU64,
    search_decisions: AtomicU64,
    /// Total wall-clock time spent in searches (microseconds)
    search_time_us: AtomicU64,
    wall_collisions: AtomicU32,
    self_collisions: AtomicU32,
    boards_filled: AtomicU32,
    step_limit_hits: AtomicU32,
    /// Start time for rate calculations
    start_time: Instant,
    /// Path to write stats file
    stats_path: PathBuf,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActorStatsSnapshot {
    pub episodes_completed: u32,
    pub total_score: u64,
    pub best_score: u32,
    pub avg_score: f64,
    pub total_steps: u64,
    pub avg_episode_length: f64,
    pub path_decisions: u64,
    pub search_decisions: u64,
    pub search_avg_us: f64,
    pub wall_collisions: u32,
    pub self_collisions: u32,
    pub boards_filled: u32,
    pub step_limit_hits: u32,
    pub episodes_per_second: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl ActorStats {
    /// Create new stats tracker writing to `stats_path`.
    pub fn new(stats_path: impl Into<PathBuf>) -> Self {
        let stats_path = stats_path.into();

        // Ensure data directory exists
        if let Some(dir) = stats_path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!("Failed to create data directory: {}", e);
            }
        }

        Self {
            episodes_completed: AtomicU32::new(0),
            total_score: AtomicU64::new(0),
            best_score: AtomicU32::new(0),
            total_steps: AtomicU64::new(0),
            path_decisions: AtomicU64::new(0),
            search_decisions: AtomicU64::new(0),
            search_time_us: AtomicU64::new(0),
            wall_collisions: AtomicU32::new(0),
            self_collisions: AtomicU32::new(0),
            boards_filled: AtomicU32::new(0),
            step_limit_hits: AtomicU32::new(0),
            start_time: Instant::now(),
            stats_path,
        }
    }

    /// Record a completed episode.
    pub fn record_episode(&self, outcome: &EpisodeOutcome) {
        self.episodes_completed.fetch_add(1, Ordering::Relaxed);
        self.total_score
            .fetch_add(u64::from(outcome.score), Ordering::Relaxed);
        self.best_score.fetch_max(outcome.score, Ordering::Relaxed);
        self.total_steps
            .fetch_add(u64::from(outcome.steps), Ordering::Relaxed);

        let counter = match outcome.end {
            EpisodeEnd::Collision(Collision::OutOfBounds) => &self.wall_collisions,
            EpisodeEnd::Collision(Collision::SelfCollision) => &self.self_collisions,
            EpisodeEnd::BoardFilled => &self.boards_filled,
            EpisodeEnd::StepLimit => &self.step_limit_hits,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record where one move came from.
    pub fn record_decision(&self, source: &DecisionSource) {
        match *source {
            DecisionSource::ShortestPath { .. } => {
                self.path_decisions.fetch_add(1, Ordering::Relaxed);
            }
            DecisionSource::Search { elapsed_us, .. } => {
                self.search_decisions.fetch_add(1, Ordering::Relaxed);
                self.search_time_us.fetch_add(elapsed_us, Ordering::Relaxed);
            }
        }
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> ActorStatsSnapshot {
        let episodes = self.episodes_completed.load(Ordering::Relaxed);
        let total_score = self.total_score.load(Ordering::Relaxed);
        let total_steps = self.total_steps.load(Ordering::Relaxed);
        let searches = self.search_decisions.load(Ordering::Relaxed);
        let search_time_us = self.search_time_us.load(Ordering::Relaxed);
        let runtime = self.start_time.elapsed().as_secs_f64();

        let (avg_score, avg_episode_length) = if episodes > 0 {
            (
                total_score as f64 / episodes as f64,
                total_steps as f64 / episodes as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let episodes_per_second = if runtime > 0.0 {
            episodes as f64 / runtime
        } else {
            0.0
        };

        let search_avg_us = if searches > 0 {
            search_time_us as f64 / searches as f64
        } else {
            0.0
        };

        ActorStatsSnapshot {
            episodes_completed: episodes,
            total_score,
            best_score: self.best_score.load(Ordering::Relaxed),
            avg_score,
            total_steps,
            avg_episode_length,
            path_decisions: self.path_decisions.load(Ordering::Relaxed),
            search_decisions: searches,
            search_avg_us,
            wall_collisions: self.wall_collisions.load(Ordering::Relaxed),
            self_collisions: self.self_collisions.load(Ordering::Relaxed),
            boards_filled: self.boards_filled.load(Ordering::Relaxed),
            step_limit_hits: self.step_limit_hits.load(Ordering::Relaxed),
            episodes_per_second,
            runtime_seconds: runtime,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Write stats to JSON file (atomic write-then-rename).
    pub fn write_stats(&self) {
        let snapshot = self.snapshot();

        // Serialize to JSON
        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize actor stats: {}", e);
                return;
            }
        };

        // Write to temp file then rename (atomic on most filesystems)
        let temp_path = self.stats_path.with_extension("json.tmp");
        match fs::File::create(&temp_path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(json.as_bytes()) {
                    warn!("Failed to write actor stats: {}", e);
                    return;
                }
            }
            Err(e) => {
                warn!("Failed to create temp stats file: {}", e);
                return;
            }
        }

        if let Err(e) = fs::rename(&temp_path, &self.stats_path) {
            warn!("Failed to rename stats file: {}", e);
            // Try to clean up temp file
            let _ = fs::remove_file(&temp_path);
            return;
        }

        debug!("Wrote actor stats to {}", self.stats_path.display());
    }

    #[allow(dead_code)]
    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }
}

//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events, allowing
//! composable data collection without coupling the training loop to specific
//! output formats or metrics.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    discretizer::DiscreteState,
    environment::{Action, ActionTally, Difficulty, RawState},
};

/// One environment step as seen by observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Day index within the episode (0-based)
    pub day: usize,
    /// Discrete state the action was chosen in
    pub state: DiscreteState,
    pub action: Action,
    pub reward: f64,
    /// Continuous state after the step
    pub next_state: RawState,
}

/// Summary of a finished episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub episode: usize,
    pub total_reward: f64,
    pub steps: usize,
    pub action_counts: ActionTally,
    /// Exploration rate used during the episode
    pub epsilon: f64,
    pub difficulty: Difficulty,
    /// State when the exam arrived
    pub final_state: RawState,
}

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once
/// 2. For each episode:
///    - `on_episode_start(episode, start_state)`
///    - `on_step(episode, record)` - for each day
///    - `on_episode_end(stats)`
/// 3. `on_training_end()` - once
///
/// # Examples
///
/// ```no_run
/// use exam_balancer::ports::{EpisodeStats, Observer};
///
/// struct BestEpisode {
///     best: f64,
/// }
///
/// impl Observer for BestEpisode {
///     fn on_episode_end(&mut self, stats: &EpisodeStats) -> exam_balancer::Result<()> {
///         self.best = self.best.max(stats.total_reward);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts, after any start randomisation.
    fn on_episode_start(&mut self, _episode: usize, _start: &RawState) -> Result<()> {
        Ok(())
    }

    /// Called after every environment step.
    fn on_step(&mut self, _episode: usize, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches the exam day.
    fn on_episode_end(&mut self, _stats: &EpisodeStats) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

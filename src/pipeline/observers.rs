//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    environment::{ActionTally, Difficulty, RawState},
    ports::{EpisodeStats, Observer, StepRecord},
};

/// Complete observation of a training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Episode number
    pub episode: usize,
    pub difficulty: Difficulty,
    /// State after start randomisation
    pub start_state: RawState,
    pub total_reward: f64,
    pub epsilon: f64,
    /// Steps in the episode
    pub steps: Vec<StepRecord>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    reward_sum: f64,
    episodes: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            reward_sum: 0.0,
            episodes: 0,
        }
    }

    fn message(&self, epsilon: f64) -> String {
        let average = if self.episodes == 0 {
            0.0
        } else {
            self.reward_sum / self.episodes as f64
        };
        format!("avg reward {average:.2}, ε {epsilon:.3}")
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        self.reward_sum += stats.total_reward;
        self.episodes += 1;

        if let Some(pb) = &self.progress_bar {
            pb.set_position(self.episodes as u64);
            pb.set_message(self.message(stats.epsilon));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish();
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    rewards: Vec<f64>,
    steps: Vec<usize>,
    action_counts: ActionTally,
    burnout_days: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mean episode reward
    pub fn average_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
        }
    }

    /// Get the mean episode length in days
    pub fn avg_episode_length(&self) -> f64 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.steps.iter().sum::<usize>() as f64 / self.steps.len() as f64
        }
    }

    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.rewards.len(),
            average_reward: self.average_reward(),
            best_reward: self.rewards.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            worst_reward: self.rewards.iter().copied().fold(f64::INFINITY, f64::min),
            avg_episode_length: self.avg_episode_length(),
            action_counts: self.action_counts,
            burnout_days: self.burnout_days,
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub average_reward: f64,
    pub best_reward: f64,
    pub worst_reward: f64,
    pub avg_episode_length: f64,
    pub action_counts: ActionTally,
    /// Days that ended with fatigue or stress above the burnout threshold
    pub burnout_days: usize,
}

impl Observer for MetricsObserver {
    fn on_step(&mut self, _episode: usize, record: &StepRecord) -> Result<()> {
        if record.next_state.fatigue > crate::environment::BURNOUT_THRESHOLD
            || record.next_state.stress > crate::environment::BURNOUT_THRESHOLD
        {
            self.burnout_days += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        self.rewards.push(stats.total_reward);
        self.steps.push(stats.steps);
        self.action_counts.merge(&stats.action_counts);
        Ok(())
    }
}

/// JSONL observer - Exports observations to JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    start_state: Option<RawState>,
    current_steps: Vec<StepRecord>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self {
            writer,
            start_state: None,
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize, start: &RawState) -> Result<()> {
        self.start_state = Some(*start);
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, record: &StepRecord) -> Result<()> {
        self.current_steps.push(record.clone());
        Ok(())
    }

    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        let observation = Observation {
            episode: stats.episode,
            difficulty: stats.difficulty,
            start_state: self.start_state.take().unwrap_or(stats.final_state),
            total_reward: stats.total_reward,
            epsilon: stats.epsilon,
            steps: std::mem::take(&mut self.current_steps),
        };

        // One JSON object per line
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Log observer - Reports episodes through the `log` facade
///
/// Every `interval`-th episode is logged at info level with its action
/// breakdown; all other episodes go to debug.
pub struct LogObserver {
    interval: usize,
}

impl LogObserver {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Observer for LogObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        log::info!("starting {total_episodes} training episodes");
        Ok(())
    }

    fn on_episode_end(&mut self, stats: &EpisodeStats) -> Result<()> {
        let episode = stats.episode + 1;
        if episode.is_multiple_of(self.interval) {
            log::info!(
                "episode {episode}: reward {:.2}, ε {:.3}, {} ({})",
                stats.total_reward,
                stats.epsilon,
                stats.action_counts,
                stats.difficulty
            );
        } else {
            log::debug!(
                "episode {episode}: reward {:.2}, {}",
                stats.total_reward,
                stats.action_counts
            );
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        log::info!("training finished");
        Ok(())
    }
}

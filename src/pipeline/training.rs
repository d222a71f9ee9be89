//! Episodic SARSA training loop

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    discretizer::discretize,
    environment::{ALL_DIFFICULTIES, ActionTally, Difficulty, RawState, StudentEnvironment},
    ports::{EpisodeStats, Learner, Observer, StepRecord},
};

/// Window used for the recent-reward average in [`TrainingResult`].
pub const RECENT_WINDOW: usize = 50;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Randomise fatigue, stress, retention and difficulty at each reset
    pub randomize_start: bool,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 3000,
            randomize_start: true,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub episodes: usize,

    /// Mean total reward per episode
    pub average_reward: f64,

    /// Best single-episode reward
    pub best_reward: f64,

    /// Mean reward over the last [`RECENT_WINDOW`] episodes
    pub recent_average_reward: f64,

    /// Exploration rate after the last decay
    pub final_epsilon: f64,

    /// Distinct discrete states in the learned table
    pub learned_states: usize,

    /// Actions taken over all episodes
    pub action_counts: ActionTally,

    /// Total reward of every episode, in order
    pub episode_rewards: Vec<f64>,
}

impl TrainingResult {
    /// Build a result from the per-episode rewards.
    pub fn new(
        episode_rewards: Vec<f64>,
        action_counts: ActionTally,
        final_epsilon: f64,
        learned_states: usize,
    ) -> Self {
        let episodes = episode_rewards.len();
        let recent_start = episodes.saturating_sub(RECENT_WINDOW);
        Self {
            episodes,
            average_reward: mean(&episode_rewards),
            best_reward: episode_rewards
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
            recent_average_reward: mean(&episode_rewards[recent_start..]),
            final_epsilon,
            learned_states,
            action_counts,
            episode_rewards,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Training pipeline driving a learner through repeated exam episodes.
///
/// The learner and environment are injected per run; the pipeline only owns
/// its configuration, the observers and the RNG used for start randomisation.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    rng: StdRng,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            config,
            observers: Vec::new(),
            rng,
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `agent` on `env` for the configured number of episodes.
    pub fn run(
        &mut self,
        agent: &mut dyn Learner,
        env: &mut StudentEnvironment,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        log::info!(
            "training {} for {} episodes of {} days",
            agent.name(),
            self.config.episodes,
            env.total_days()
        );

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut rewards = Vec::with_capacity(self.config.episodes);
        let mut action_counts = ActionTally::default();

        for episode in 0..self.config.episodes {
            let stats = self.run_episode(episode, agent, env)?;
            rewards.push(stats.total_reward);
            action_counts.merge(&stats.action_counts);

            for observer in &mut self.observers {
                observer.on_episode_end(&stats)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::new(
            rewards,
            action_counts,
            agent.exploration_rate(),
            agent.learned_states(),
        );
        log::info!(
            "training complete: average reward {:.3}, {} learned states",
            result.average_reward,
            result.learned_states
        );
        Ok(result)
    }

    fn run_episode(
        &mut self,
        episode: usize,
        agent: &mut dyn Learner,
        env: &mut StudentEnvironment,
    ) -> Result<EpisodeStats> {
        env.reset();
        if self.config.randomize_start {
            randomize_start(&mut self.rng, env);
        }
        let start = *env.state();

        for observer in &mut self.observers {
            observer.on_episode_start(episode, &start)?;
        }

        let epsilon = agent.exploration_rate();
        let mut state = discretize(&start);
        let mut action = agent.choose_action(&state);
        let mut total_reward = 0.0;
        let mut action_counts = ActionTally::default();
        let mut day = 0;

        loop {
            let step = env.step(action);
            action_counts.record(action);

            let next_state = discretize(&step.state);
            // On-policy look-ahead: the next action comes from the same policy.
            let next_action = agent.choose_action(&next_state);
            agent.update(&state, action, step.reward, &next_state, next_action);

            let record = StepRecord {
                day,
                state,
                action,
                reward: step.reward,
                next_state: step.state,
            };
            for observer in &mut self.observers {
                observer.on_step(episode, &record)?;
            }

            total_reward += step.reward;
            day += 1;
            state = next_state;
            action = next_action;

            if step.done {
                break;
            }
        }

        agent.end_episode();

        Ok(EpisodeStats {
            episode,
            total_reward,
            steps: day,
            action_counts,
            epsilon,
            difficulty: start.difficulty,
            final_state: *env.state(),
        })
    }
}

/// Replace the freshly reset state with random start conditions.
///
/// Days left are kept; the difficulty change applies to this episode only.
fn randomize_start(rng: &mut StdRng, env: &mut StudentEnvironment) {
    let difficulty = ALL_DIFFICULTIES
        .choose(rng)
        .copied()
        .unwrap_or(Difficulty::Medium);
    let state = RawState {
        fatigue: f64::from(rng.random_range(0..=100u32)),
        stress: f64::from(rng.random_range(0..=100u32)),
        retention: rng.random::<f64>(),
        days_left: env.state().days_left,
        difficulty,
    };
    env.set_state(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        environment::TRAINABLE_ACTIONS,
        sarsa::{FrozenPolicy, Hyperparameters, SarsaAgent, ValueTable},
    };

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig {
            episodes: 20,
            randomize_start: true,
            seed: Some(42),
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), Hyperparameters::default());
        let mut env = StudentEnvironment::new(7, Difficulty::Medium);

        let result = pipeline.run(&mut agent, &mut env).unwrap();

        assert_eq!(result.episodes, 20);
        assert_eq!(result.episode_rewards.len(), 20);
        assert_eq!(result.action_counts.total(), 20 * 7);
        assert!(result.learned_states > 0);
        assert!((result.final_epsilon - 0.997f64.powi(20)).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let config = TrainingConfig {
                episodes: 30,
                randomize_start: true,
                seed: Some(seed),
            };
            let mut agent =
                SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), Hyperparameters::default());
            let mut env = StudentEnvironment::new(10, Difficulty::Hard);
            let result = TrainingPipeline::new(config)
                .run(&mut agent, &mut env)
                .unwrap();
            (result.episode_rewards, agent.into_table())
        };

        let (rewards_a, table_a) = run(9);
        let (rewards_b, table_b) = run(9);
        assert_eq!(rewards_a, rewards_b);
        assert_eq!(table_a, table_b);
    }

    #[test]
    fn test_frozen_learner_is_not_updated() {
        let mut policy = FrozenPolicy::new(ValueTable::new(), TRAINABLE_ACTIONS.to_vec());
        let mut env = StudentEnvironment::new(4, Difficulty::Easy);
        let config = TrainingConfig {
            episodes: 3,
            randomize_start: false,
            seed: Some(1),
        };

        let result = TrainingPipeline::new(config)
            .run(&mut policy, &mut env)
            .unwrap();

        assert_eq!(result.learned_states, 0);
        // Greedy over an empty table always studies.
        assert_eq!(result.action_counts.study, 12);
    }

    #[test]
    fn test_result_statistics() {
        let rewards: Vec<f64> = (0..60).map(f64::from).collect();
        let result = TrainingResult::new(rewards, ActionTally::default(), 0.05, 3);
        assert_eq!(result.best_reward, 59.0);
        assert!((result.average_reward - 29.5).abs() < 1e-12);
        // last 50 episodes: 10..=59
        assert!((result.recent_average_reward - 34.5).abs() < 1e-12);
    }
}

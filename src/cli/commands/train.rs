//! Train command - Learn a study policy with SARSA

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{AgentConfig, App},
    cli::{
        config::TrainFileConfig,
        output::{format_distribution, format_number, print_kv, print_section},
    },
    environment::{Difficulty, EnvironmentConfig, StudentEnvironment},
    export::RewardCsvExporter,
    pipeline::{JsonlObserver, LogObserver, ProgressObserver, TrainingConfig, TrainingPipeline},
    sarsa::{Hyperparameters, TrainingMetadata},
};

/// Default location of the trained policy
pub const DEFAULT_POLICY_PATH: &str = "trained_policy.msgpack";

const DEFAULT_EPISODES: usize = 3000;
const DEFAULT_DAYS: u32 = 15;

pub(crate) fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a study policy")]
pub struct TrainArgs {
    /// JSON file with training settings (flags take precedence)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of training episodes [default: 3000]
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Days until the exam in each episode [default: 15]
    #[arg(long, short = 'd')]
    pub days: Option<u32>,

    /// Exam difficulty used when start conditions are fixed [default: medium]
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Start every episode from the baseline state instead of a random one
    #[arg(long, default_value_t = false)]
    pub fixed_start: bool,

    /// Learning rate [default: 0.1]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor [default: 0.9]
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Initial exploration rate [default: 1.0]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Per-episode exploration decay [default: 0.997]
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Exploration floor [default: 0.05]
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained policy [default: trained_policy.msgpack]
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional CSV file for the per-episode reward curve
    #[arg(long)]
    pub rewards_csv: Option<PathBuf>,

    /// Optional file for JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Log an episode summary every N episodes
    #[arg(long, default_value_t = 100)]
    pub log_interval: usize,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

/// Training settings after merging flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedTraining {
    pub environment: EnvironmentConfig,
    pub agent: AgentConfig,
    pub training: TrainingConfig,
    pub output: PathBuf,
}

impl TrainArgs {
    /// Merge flags over `file` over the defaults.
    pub fn resolve(&self, file: &TrainFileConfig) -> Result<ResolvedTraining> {
        let defaults = Hyperparameters::default();

        let difficulty = match self.difficulty.as_ref().or(file.difficulty.as_ref()) {
            Some(label) => label
                .parse::<Difficulty>()
                .with_context(|| format!("Invalid difficulty '{label}'"))?,
            None => Difficulty::default(),
        };

        let hyperparameters = Hyperparameters {
            alpha: self.alpha.or(file.alpha).unwrap_or(defaults.alpha),
            gamma: self.gamma.or(file.gamma).unwrap_or(defaults.gamma),
            epsilon: self.epsilon.or(file.epsilon).unwrap_or(defaults.epsilon),
            epsilon_decay: self
                .epsilon_decay
                .or(file.epsilon_decay)
                .unwrap_or(defaults.epsilon_decay),
            min_epsilon: self
                .min_epsilon
                .or(file.min_epsilon)
                .unwrap_or(defaults.min_epsilon),
        };

        let seed = self.seed.or(file.seed);
        let mut agent = AgentConfig::new().with_hyperparameters(hyperparameters);
        if let Some(seed) = seed {
            agent = agent.with_seed(seed);
        }
        agent.validate()?;

        let randomize_start = if self.fixed_start {
            false
        } else {
            file.randomize_start.unwrap_or(true)
        };

        Ok(ResolvedTraining {
            environment: EnvironmentConfig {
                total_days: self.days.or(file.days).unwrap_or(DEFAULT_DAYS),
                difficulty,
            },
            agent,
            training: TrainingConfig {
                episodes: self.episodes.or(file.episodes).unwrap_or(DEFAULT_EPISODES),
                randomize_start,
                seed,
            },
            output: self
                .output
                .clone()
                .or_else(|| file.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_POLICY_PATH)),
        })
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => TrainFileConfig::load(path)?,
        None => TrainFileConfig::default(),
    };
    let resolved = args.resolve(&file_config)?;

    print_section("SARSA Training");
    print_kv("Episodes", &format_number(resolved.training.episodes));
    print_kv("Days per episode", &resolved.environment.total_days.to_string());
    if resolved.training.randomize_start {
        print_kv("Start", "randomized");
    } else {
        print_kv("Start", "baseline");
        print_kv("Difficulty", resolved.environment.difficulty.as_str());
    }
    let params = resolved.agent.hyperparameters;
    print_kv(
        "Hyperparameters",
        &format!(
            "α={} γ={} ε={} decay={} floor={}",
            params.alpha, params.gamma, params.epsilon, params.epsilon_decay, params.min_epsilon
        ),
    );
    if let Some(seed) = resolved.training.seed {
        print_kv("Seed", &seed.to_string());
    }

    let app = App::new();
    let mut agent = app.create_agent(resolved.agent.clone())?;
    let mut env = StudentEnvironment::from_config(&resolved.environment);

    let mut pipeline = TrainingPipeline::new(resolved.training.clone())
        .with_observer(Box::new(LogObserver::new(args.log_interval)));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create observations file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&mut agent, &mut env)?;

    print_section("Training Results");
    print_kv("Average reward", &format!("{:.3}", result.average_reward));
    print_kv(
        "Last 50 average",
        &format!("{:.3}", result.recent_average_reward),
    );
    print_kv("Best reward", &format!("{:.3}", result.best_reward));
    print_kv("Final epsilon", &format!("{:.4}", result.final_epsilon));
    print_kv("Learned states", &result.learned_states.to_string());
    print_kv("Actions", &format_distribution(&result.action_counts));

    let metadata = TrainingMetadata {
        episodes_trained: Some(result.episodes),
        total_days: Some(resolved.environment.total_days),
        randomized_start: Some(resolved.training.randomize_start),
        seed: resolved.training.seed,
        average_reward: Some(result.average_reward),
        final_epsilon: Some(result.final_epsilon),
        saved_at: None,
    };
    app.save_agent(&agent, metadata, &resolved.output)
        .with_context(|| format!("Failed to save policy to {}", resolved.output.display()))?;
    println!("\nPolicy saved to {}", resolved.output.display());

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        result
            .save(&path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    if let Some(path) = &args.rewards_csv {
        let rows = RewardCsvExporter::default()
            .export(&result.episode_rewards, path)
            .with_context(|| format!("Failed to write rewards to {}", path.display()))?;
        println!("Reward curve ({rows} episodes) written to {}", path.display());
    }

    Ok(())
}

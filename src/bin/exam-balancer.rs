//! Exam balancer CLI
//!
//! This CLI provides a unified interface for:
//! - Training a SARSA study policy
//! - Evaluating and simulating a trained policy
//! - Recommending the next action from a self-assessment
//! - Inspecting saved policy files

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "exam-balancer")]
#[command(version, about = "Balance exam preparation against burnout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a SARSA policy on simulated exam periods
    Train(Box<exam_balancer::cli::commands::train::TrainArgs>),

    /// Evaluate a trained policy on every difficulty
    Evaluate(exam_balancer::cli::commands::evaluate::EvaluateArgs),

    /// Recommend the next action for a student
    Recommend(exam_balancer::cli::commands::recommend::RecommendArgs),

    /// Simulate one exam period with a trained policy
    Simulate(exam_balancer::cli::commands::simulate::SimulateArgs),

    /// Show the contents of a policy file
    Inspect(exam_balancer::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => exam_balancer::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => exam_balancer::cli::commands::evaluate::execute(args),
        Commands::Recommend(args) => exam_balancer::cli::commands::recommend::execute(args),
        Commands::Simulate(args) => exam_balancer::cli::commands::simulate::execute(args),
        Commands::Inspect(args) => exam_balancer::cli::commands::inspect::execute(args),
    }
}

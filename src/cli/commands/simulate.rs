//! Simulate command - Play one exam period with a trained policy

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    app::App,
    cli::{
        commands::{load_policy, train::DEFAULT_POLICY_PATH},
        output::{format_distribution, print_kv, print_section, print_state},
    },
    environment::Difficulty,
    pipeline::simulate,
};

#[derive(Parser, Debug)]
#[command(about = "Simulate an exam period with a trained policy")]
pub struct SimulateArgs {
    /// Exam difficulty (easy, medium or hard; anything else means medium)
    #[arg(long, default_value = "medium")]
    pub difficulty: String,

    /// Days until the exam
    #[arg(long, short = 'd', default_value_t = 5)]
    pub days: u32,

    /// Path to the trained policy file
    #[arg(long, short = 'p', default_value = DEFAULT_POLICY_PATH)]
    pub policy: PathBuf,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let app = App::new();
    let mut policy = load_policy(&app, &args.policy)?;

    let difficulty = Difficulty::parse_lenient(&args.difficulty);
    let report = simulate(&mut policy, difficulty, args.days);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section(&format!(
        "Simulation: {} exam in {} days",
        difficulty.label(),
        args.days
    ));
    for (day, action) in report.actions.iter().enumerate() {
        print_kv(&format!("Day {}", day + 1), action.label());
    }
    println!();
    print_kv("Total reward", &format!("{:.2}", report.total_reward));
    print_kv("Actions", &format_distribution(&report.action_counts));
    print_state(&report.final_state);

    Ok(())
}

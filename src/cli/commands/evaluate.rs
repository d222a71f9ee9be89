//! Evaluate command - Run a trained policy on every exam difficulty

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        commands::{load_policy, train::DEFAULT_POLICY_PATH},
        output::{format_distribution, print_kv, print_section, print_state, print_subsection},
    },
    pipeline::evaluate,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained policy across difficulties")]
pub struct EvaluateArgs {
    /// Path to the trained policy file
    #[arg(default_value = DEFAULT_POLICY_PATH)]
    pub policy: PathBuf,

    /// Days until the exam
    #[arg(long, short = 'd', default_value_t = 5)]
    pub days: u32,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let app = App::new();
    let mut policy = load_policy(&app, &args.policy)?;

    print_section(&format!("Policy Evaluation ({} days)", args.days));
    print_kv("Policy", &args.policy.display().to_string());
    print_kv("Learned states", &policy.table().len().to_string());

    let reports = evaluate(&mut policy, args.days);

    for report in &reports {
        print_subsection(&format!("Difficulty: {}", report.difficulty.label()));
        print_kv("Total reward", &format!("{:.2}", report.total_reward));
        print_kv("Actions", &format_distribution(&report.action_counts));
        let plan: Vec<_> = report.actions.iter().map(|a| a.label()).collect();
        print_kv("Plan", &plan.join(" → "));
        print_state(&report.final_state);
    }

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &reports)?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}

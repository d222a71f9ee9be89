//! Inspect command - Show what a policy file has learned

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    app::App,
    cli::{
        commands::{policy_context, train::DEFAULT_POLICY_PATH},
        output::{format_number, print_kv, print_section, print_subsection},
    },
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a trained policy file")]
pub struct InspectArgs {
    /// Path to the trained policy file
    #[arg(default_value = DEFAULT_POLICY_PATH)]
    pub policy: PathBuf,

    /// Maximum number of learned states to print
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let app = App::new();
    let saved = policy_context(app.load_saved(&args.policy), &args.policy)?;

    print_section("Policy");
    print_kv("File", &args.policy.display().to_string());
    print_kv("Format version", &saved.version.to_string());
    let actions: Vec<_> = saved.actions.iter().map(|a| a.label()).collect();
    print_kv("Actions", &actions.join(", "));
    let params = saved.hyperparameters;
    print_kv(
        "Hyperparameters",
        &format!(
            "α={} γ={} ε={} decay={} floor={}",
            params.alpha, params.gamma, params.epsilon, params.epsilon_decay, params.min_epsilon
        ),
    );

    let meta = &saved.metadata;
    if let Some(episodes) = meta.episodes_trained {
        print_kv("Episodes trained", &format_number(episodes));
    }
    if let Some(days) = meta.total_days {
        print_kv("Days per episode", &days.to_string());
    }
    if let Some(reward) = meta.average_reward {
        print_kv("Average reward", &format!("{reward:.3}"));
    }
    if let Some(epsilon) = meta.final_epsilon {
        print_kv("Final epsilon", &format!("{epsilon:.4}"));
    }
    if let Some(seed) = meta.seed {
        print_kv("Seed", &seed.to_string());
    }
    if let Some(saved_at) = &meta.saved_at {
        print_kv("Saved at (unix)", saved_at);
    }

    print_subsection(&format!(
        "Learned states ({})",
        format_number(saved.table.len())
    ));
    let limit = args.limit.unwrap_or(usize::MAX);
    for (state, values) in saved.table.iter().take(limit) {
        let row: Vec<_> = values
            .iter()
            .map(|(action, value)| format!("{}={value:.3}", action.label()))
            .collect();
        let best = values
            .best_action(&saved.actions)
            .map(|a| a.label())
            .unwrap_or("-");
        println!("  {state}  {}  → {best}", row.join(" "));
    }
    if saved.table.len() > limit {
        println!("  ... {} more", saved.table.len() - limit);
    }

    Ok(())
}

//! Recommend command - Ask a trained policy what to do today

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    advisor::{AdviceRequest, Advisor},
    app::App,
    cli::{
        commands::{load_policy, train::DEFAULT_POLICY_PATH},
        output::{print_kv, print_section},
    },
};

#[derive(Parser, Debug)]
#[command(about = "Recommend the next study action")]
pub struct RecommendArgs {
    /// How tired the student feels (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub fatigue: String,

    /// How stressed the student feels (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub stress: String,

    /// How well the material is retained (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub retention: String,

    /// Days until the exam
    #[arg(long, default_value_t = 10)]
    pub days_left: u32,

    /// Exam difficulty (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    pub difficulty: String,

    /// Path to the trained policy file
    #[arg(long, short = 'p', default_value = DEFAULT_POLICY_PATH)]
    pub policy: PathBuf,

    /// Print the recommendation as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl RecommendArgs {
    pub fn request(&self) -> AdviceRequest {
        AdviceRequest {
            fatigue: self.fatigue.clone(),
            stress: self.stress.clone(),
            retention: self.retention.clone(),
            days_left: self.days_left,
            difficulty: self.difficulty.clone(),
        }
    }
}

pub fn execute(args: RecommendArgs) -> Result<()> {
    let app = App::new();
    let advisor = Advisor::new(load_policy(&app, &args.policy)?);
    let recommendation = advisor.recommend(&args.request());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    print_section("Recommendation");
    print_kv("State", &recommendation.discrete_state.to_string());
    print_kv("Recommended action", &recommendation.label);
    if let Some(warning) = &recommendation.warning {
        println!("\n⚠️  {warning}");
    }

    Ok(())
}

//! Greedy rollouts of a policy through whole exam periods

use serde::{Deserialize, Serialize};

use crate::{
    discretizer::discretize,
    environment::{ALL_DIFFICULTIES, Action, ActionTally, Difficulty, RawState, StudentEnvironment},
    ports::Learner,
};

/// Outcome of one simulated exam period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub difficulty: Difficulty,
    pub days: u32,
    pub total_reward: f64,
    /// Action taken on each day, in order
    pub actions: Vec<Action>,
    pub action_counts: ActionTally,
    /// State on exam day
    pub final_state: RawState,
}

/// Play one episode on `env` from a fresh reset without learning.
///
/// The learner is only asked for actions; no value updates happen. The
/// episode is bounded by the environment's `total_days`.
pub fn rollout(learner: &mut dyn Learner, env: &mut StudentEnvironment) -> SimulationReport {
    let mut state = env.reset();
    let mut actions = Vec::new();
    let mut action_counts = ActionTally::default();
    let mut total_reward = 0.0;

    loop {
        let action = learner.choose_action(&discretize(&state));
        let step = env.step(action);
        actions.push(action);
        action_counts.record(action);
        total_reward += step.reward;
        state = step.state;
        if step.done {
            break;
        }
    }

    SimulationReport {
        difficulty: env.difficulty(),
        days: env.total_days(),
        total_reward,
        actions,
        action_counts,
        final_state: state,
    }
}

/// Simulate an exam of the given difficulty `days` days away.
pub fn simulate(learner: &mut dyn Learner, difficulty: Difficulty, days: u32) -> SimulationReport {
    let mut env = StudentEnvironment::new(days, Difficulty::default());
    env.reset();
    env.set_difficulty(difficulty);
    let report = rollout(learner, &mut env);
    log::debug!(
        "simulated {} days at {}: reward {:.3}",
        days,
        difficulty,
        report.total_reward
    );
    report
}

/// Run the policy once per difficulty level.
pub fn evaluate(learner: &mut dyn Learner, days: u32) -> Vec<SimulationReport> {
    ALL_DIFFICULTIES
        .iter()
        .map(|&difficulty| simulate(learner, difficulty, days))
        .collect()
}

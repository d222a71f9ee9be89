//! Common test utilities for the exam balancer test suite.

use exam_balancer::{
    Difficulty, RawState,
    discretizer::discretize,
    environment::StudentEnvironment,
    sarsa::SarsaAgent,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Draw a random in-range state from a seeded RNG.
#[allow(dead_code)]
pub fn random_state(rng: &mut StdRng) -> RawState {
    let difficulty = match rng.random_range(0..3) {
        0 => Difficulty::Easy,
        1 => Difficulty::Medium,
        _ => Difficulty::Hard,
    };
    RawState::new(
        rng.random_range(0.0..=100.0),
        rng.random_range(0.0..=100.0),
        rng.random::<f64>(),
        rng.random_range(0..=30),
        difficulty,
    )
}

#[allow(dead_code)]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Play one SARSA episode on `env`, returning the total reward.
#[allow(dead_code)]
pub fn run_sarsa_episode(agent: &mut SarsaAgent, env: &mut StudentEnvironment) -> f64 {
    let mut state = discretize(&env.reset());
    let mut action = agent.choose_action(&state);
    let mut total = 0.0;
    loop {
        let step = env.step(action);
        let next_state = discretize(&step.state);
        let next_action = agent.choose_action(&next_state);
        agent.update(&state, action, step.reward, &next_state, next_action);
        total += step.reward;
        state = next_state;
        action = next_action;
        if step.done {
            return total;
        }
    }
}

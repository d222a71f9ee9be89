//! SARSA learning against the student environment

mod common;

use exam_balancer::{
    Action, Difficulty, StudentEnvironment,
    discretizer::{DiscreteState, Level, discretize},
    environment::TRAINABLE_ACTIONS,
    sarsa::{Hyperparameters, SarsaAgent, ValueTable},
};

fn key() -> DiscreteState {
    DiscreteState::new(
        Level::Low,
        Level::Low,
        Level::Low,
        Level::Low,
        Difficulty::Medium,
    )
}

#[test]
fn update_touches_only_the_visited_entry() {
    let next = DiscreteState::new(
        Level::Medium,
        Level::Low,
        Level::Low,
        Level::Low,
        Difficulty::Medium,
    );
    let mut table = ValueTable::new();
    table.set(key(), Action::Study, 1.0);
    table.set(key(), Action::Break, 4.0);
    table.set(next, Action::Revise, 2.0);

    let mut agent =
        SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), Hyperparameters::default()).with_table(table);
    agent.update(&key(), Action::Study, 3.0, &next, Action::Revise);

    // 1.0 + 0.1 * (3.0 + 0.9 * 2.0 - 1.0)
    assert!((agent.table().value(&key(), Action::Study) - 1.38).abs() < 1e-12);
    assert_eq!(agent.table().value(&key(), Action::Break), 4.0);
    assert_eq!(agent.table().value(&next, Action::Revise), 2.0);
}

#[test]
fn greedy_agent_is_deterministic() {
    let params = Hyperparameters {
        epsilon: 0.0,
        ..Default::default()
    };
    let mut table = ValueTable::new();
    table.set(key(), Action::Revise, 0.7);

    let mut a = SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), params).with_table(table.clone());
    let mut b = SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), params)
        .with_table(table)
        .with_seed(99);

    for _ in 0..50 {
        assert_eq!(a.choose_action(&key()), Action::Revise);
        assert_eq!(b.choose_action(&key()), Action::Revise);
    }
}

#[test]
fn training_populates_reachable_states() {
    let mut agent =
        SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), Hyperparameters::default()).with_seed(4);
    let mut env = StudentEnvironment::new(10, Difficulty::Hard);

    for _ in 0..50 {
        common::run_sarsa_episode(&mut agent, &mut env);
        agent.decay_epsilon();
    }

    let start = discretize(&env.reset());
    assert!(agent.table().contains(&start));
    assert!(agent.epsilon() < 1.0);
    for (state, _) in agent.table().iter() {
        assert_eq!(state.difficulty, Difficulty::Hard);
    }
}

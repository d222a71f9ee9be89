//! Environment behaviour over whole episodes

mod common;

use exam_balancer::{
    Action, Difficulty, RawState, StudentEnvironment,
    environment::TRAINABLE_ACTIONS,
};
use rand::seq::IndexedRandom;

#[test]
fn three_day_study_scenario() {
    let mut env = StudentEnvironment::new(3, Difficulty::Medium);
    let mut previous = env.reset();

    let mut steps = Vec::new();
    loop {
        let step = env.step(Action::Study);
        assert!(
            step.state.fatigue > previous.fatigue,
            "fatigue should rise every study day"
        );
        previous = step.state;
        steps.push(step);
        if step.done {
            break;
        }
    }

    assert_eq!(steps.len(), 3);
    assert!(!steps[0].done);
    assert!(!steps[1].done);

    let fatigue: Vec<f64> = steps.iter().map(|step| step.state.fatigue).collect();
    assert_eq!(fatigue, vec![42.0, 54.0, 66.0]);

    let last = steps[2];
    assert_eq!(last.state.days_left, 0);
    assert!(last.state.retention > RawState::INITIAL_RETENTION);
    assert!((last.state.retention - 0.4484).abs() < 1e-9);

    // Study reward, low-retention bonus, exam-day retention bonus, urgency bonus.
    let gain = 0.16 * (1.0 - 54.0 / 100.0);
    let expected = 20.0 * gain - 0.04 * 66.0 - 0.03 * 44.0
        + 5.0
        + 15.0 * last.state.retention
        + 5.0;
    assert!(
        (last.reward - expected).abs() < 1e-9,
        "exam-day reward {} != {expected}",
        last.reward
    );
    assert!((last.reward - 14.238).abs() < 1e-9);
}

#[test]
fn random_actions_keep_state_in_range() {
    let mut rng = common::seeded_rng(3);
    for days in [1, 5, 15, 30] {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut env = StudentEnvironment::new(days, difficulty);
            env.reset();
            let mut steps = 0;
            loop {
                let action = *TRAINABLE_ACTIONS.choose(&mut rng).unwrap();
                let step = env.step(action);
                steps += 1;
                assert!(step.state.in_range(), "out of range: {}", step.state);
                assert!(step.reward.is_finite());
                if step.done {
                    break;
                }
            }
            assert_eq!(steps, days);
        }
    }
}

#[test]
fn arbitrary_start_states_stay_in_range() {
    let mut rng = common::seeded_rng(17);
    let mut env = StudentEnvironment::default();
    for _ in 0..200 {
        env.set_state(common::random_state(&mut rng));
        for code in 0..6 {
            let step = env.step_code(code);
            assert!(step.state.in_range());
        }
    }
}

#[test]
fn difficulty_persists_across_resets() {
    let mut env = StudentEnvironment::new(5, Difficulty::Easy);
    env.set_difficulty(Difficulty::Hard);
    assert_eq!(env.state().difficulty, Difficulty::Hard);
    assert_eq!(env.reset().difficulty, Difficulty::Hard);
}

#[test]
fn reserved_actions_only_apply_day_effects() {
    let mut env = StudentEnvironment::new(10, Difficulty::Medium);
    let start = env.reset();
    let step = env.step(Action::Sleep);

    assert_eq!(step.reward, 0.0);
    assert_eq!(step.state.fatigue, start.fatigue);
    assert_eq!(step.state.stress, start.stress);
    assert!((step.state.retention - (start.retention - 0.01)).abs() < 1e-12);
    assert_eq!(step.state.days_left, 9);
}

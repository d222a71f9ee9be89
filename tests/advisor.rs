//! Recommendations from coarse self-assessments

use exam_balancer::{
    Action, AdviceRequest, Advisor, Difficulty, FrozenPolicy, StudentEnvironment,
    advisor::BURNOUT_WARNING,
    discretizer::discretize,
    environment::TRAINABLE_ACTIONS,
    pipeline::{TrainingConfig, TrainingPipeline},
    sarsa::{Hyperparameters, SarsaAgent},
};

fn request(fatigue: &str, stress: &str, retention: &str, days_left: u32) -> AdviceRequest {
    AdviceRequest {
        fatigue: fatigue.into(),
        stress: stress.into(),
        retention: retention.into(),
        days_left,
        difficulty: "hard".into(),
    }
}

fn trained_advisor() -> Advisor {
    let mut agent = SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), Hyperparameters::default());
    let mut env = StudentEnvironment::new(15, Difficulty::Medium);
    TrainingPipeline::new(TrainingConfig {
        episodes: 300,
        randomize_start: true,
        seed: Some(31),
    })
    .run(&mut agent, &mut env)
    .unwrap();
    Advisor::new(FrozenPolicy::new(agent.into_table(), TRAINABLE_ACTIONS.to_vec()))
}

#[test]
fn recommendation_matches_policy_lookup() {
    let advisor = trained_advisor();
    for days_left in [1, 4, 10] {
        for level in ["low", "medium", "high"] {
            let req = request(level, "medium", level, days_left);
            let rec = advisor.recommend(&req);
            let expected = advisor.policy().best_action(&discretize(&req.to_raw_state()));
            assert_eq!(rec.action, expected);
            assert!(TRAINABLE_ACTIONS.contains(&rec.action));
            assert_eq!(rec.label, rec.action.label());
        }
    }
}

#[test]
fn burnout_warning_tracks_fatigue_and_stress() {
    let advisor = trained_advisor();
    assert_eq!(
        advisor
            .recommend(&request("high", "low", "low", 5))
            .warning
            .as_deref(),
        Some(BURNOUT_WARNING)
    );
    assert_eq!(
        advisor
            .recommend(&request("low", "high", "low", 5))
            .warning
            .as_deref(),
        Some(BURNOUT_WARNING)
    );
    assert!(
        advisor
            .recommend(&request("medium", "medium", "high", 5))
            .warning
            .is_none()
    );
}

#[test]
fn advisor_is_shareable_across_threads() {
    let advisor = trained_advisor();
    let req = request("medium", "high", "low", 3);
    let expected = advisor.recommend(&req).action;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let advisor = advisor.clone();
            let req = req.clone();
            std::thread::spawn(move || advisor.recommend(&req).action)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert!(matches!(
        expected,
        Action::Study | Action::Revise | Action::Break
    ));
}

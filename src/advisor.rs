//! Next-day recommendations from coarse self-assessments
//!
//! Students describe how they feel with `low`/`medium`/`high` labels rather
//! than numbers. The advisor maps those onto representative raw values,
//! discretizes them like the training environment does and asks a frozen
//! policy for the greedy action.

use serde::{Deserialize, Serialize};

use crate::{
    discretizer::{DiscreteState, Level, discretize},
    environment::{Action, Difficulty, RawState},
    sarsa::FrozenPolicy,
};

/// Fatigue or stress above this value triggers a burnout warning.
pub const BURNOUT_WARNING_THRESHOLD: f64 = 80.0;

pub const BURNOUT_WARNING: &str = "High burnout risk detected!";

/// Self-reported condition of a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub fatigue: String,
    pub stress: String,
    pub retention: String,
    pub days_left: u32,
    pub difficulty: String,
}

/// What the student should do next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    /// Human-readable action label
    pub label: String,
    /// Raw state the descriptors were mapped to
    pub state: RawState,
    pub discrete_state: DiscreteState,
    pub warning: Option<String>,
}

/// Parse a level label, falling back to medium for anything unrecognised.
pub fn parse_level(label: &str) -> Level {
    label.parse().unwrap_or_else(|_| {
        log::warn!("unknown level '{label}', using medium");
        Level::Medium
    })
}

/// Representative fatigue or stress value for a level.
pub fn load_value(level: Level) -> f64 {
    match level {
        Level::Low => 20.0,
        Level::Medium => 50.0,
        Level::High => 85.0,
    }
}

/// Representative retention value for a level.
pub fn retention_value(level: Level) -> f64 {
    match level {
        Level::Low => 0.2,
        Level::Medium => 0.5,
        Level::High => 0.85,
    }
}

impl AdviceRequest {
    /// Map the descriptors onto a continuous state.
    pub fn to_raw_state(&self) -> RawState {
        RawState::new(
            load_value(parse_level(&self.fatigue)),
            load_value(parse_level(&self.stress)),
            retention_value(parse_level(&self.retention)),
            self.days_left,
            Difficulty::parse_lenient(&self.difficulty),
        )
    }
}

/// Serves recommendations from a trained policy.
///
/// The policy is read-only and cheap to clone, so one advisor can be shared
/// between request handlers.
#[derive(Debug, Clone)]
pub struct Advisor {
    policy: FrozenPolicy,
}

impl Advisor {
    pub fn new(policy: FrozenPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FrozenPolicy {
        &self.policy
    }

    pub fn recommend(&self, request: &AdviceRequest) -> Recommendation {
        let state = request.to_raw_state();
        let discrete_state = discretize(&state);
        let action = self.policy.best_action(&discrete_state);

        let warning = (state.fatigue > BURNOUT_WARNING_THRESHOLD
            || state.stress > BURNOUT_WARNING_THRESHOLD)
            .then(|| BURNOUT_WARNING.to_string());

        log::debug!("recommending {action} for {discrete_state}");

        Recommendation {
            action,
            label: action.label().to_string(),
            state,
            discrete_state,
            warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{environment::TRAINABLE_ACTIONS, sarsa::ValueTable};

    fn request(fatigue: &str, stress: &str, retention: &str) -> AdviceRequest {
        AdviceRequest {
            fatigue: fatigue.to_string(),
            stress: stress.to_string(),
            retention: retention.to_string(),
            days_left: 10,
            difficulty: "medium".to_string(),
        }
    }

    #[test]
    fn test_descriptor_values() {
        let state = request("low", "high", "medium").to_raw_state();
        assert_eq!(state.fatigue, 20.0);
        assert_eq!(state.stress, 85.0);
        assert_eq!(state.retention, 0.5);
        assert_eq!(state.days_left, 10);
        assert_eq!(state.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_unknown_descriptors_fall_back_to_medium() {
        let mut req = request("exhausted", "", "HIGH");
        req.difficulty = "brutal".to_string();
        let state = req.to_raw_state();
        assert_eq!(state.fatigue, 50.0);
        assert_eq!(state.stress, 50.0);
        assert_eq!(state.retention, 0.85);
        assert_eq!(state.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_recommendation_uses_greedy_action() {
        let req = request("high", "medium", "low");
        let key = discretize(&req.to_raw_state());
        let mut table = ValueTable::new();
        table.set(key, Action::Study, -1.0);
        table.set(key, Action::Break, 0.5);

        let advisor = Advisor::new(FrozenPolicy::new(table, TRAINABLE_ACTIONS.to_vec()));
        let rec = advisor.recommend(&req);

        assert_eq!(rec.action, Action::Break);
        assert_eq!(rec.label, "Break");
        assert_eq!(rec.warning.as_deref(), Some(BURNOUT_WARNING));
    }

    #[test]
    fn test_no_warning_at_medium_load() {
        let advisor = Advisor::new(FrozenPolicy::new(ValueTable::new(), Vec::new()));
        let rec = advisor.recommend(&request("medium", "medium", "medium"));
        assert_eq!(rec.label, "Study");
        assert!(rec.warning.is_none());
    }
}

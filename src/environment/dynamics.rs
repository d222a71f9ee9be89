//! Transition rules and reward shaping for a single study day
//!
//! Each day applies the chosen action's effect first, then the day-level
//! effects that happen regardless of the action: forgetting, burnout, the
//! passage of time, the terminal retention bonus and end-of-term urgency.

use super::{
    action::Action,
    state::{MAX_FATIGUE, MAX_RETENTION, MAX_STRESS, RawState},
};

const STUDY_BASE_GAIN: f64 = 0.16;
const STUDY_FATIGUE_COST: f64 = 12.0;
const STUDY_STRESS_COST: f64 = 8.0;
const STUDY_GAIN_WEIGHT: f64 = 20.0;
const STUDY_FATIGUE_WEIGHT: f64 = 0.04;
const STUDY_STRESS_WEIGHT: f64 = 0.03;
const STUDY_LOW_RETENTION: f64 = 0.4;
const STUDY_LOW_RETENTION_BONUS: f64 = 5.0;
const STUDY_MASTERED: f64 = 0.9;
const STUDY_MASTERED_PENALTY: f64 = 5.0;

const REVISION_GAIN: f64 = 0.06;
const REVISION_GAIN_WEIGHT: f64 = 14.0;
const REVISION_FATIGUE_RELIEF: f64 = 3.0;
const REVISION_STRESS_RELIEF: f64 = 2.0;
const REVISION_FATIGUE_WEIGHT: f64 = 0.02;
const REVISION_SWEET_SPOT: (f64, f64) = (0.4, 0.8);
const REVISION_SWEET_SPOT_BONUS: f64 = 2.0;
const REVISION_TOO_EARLY: f64 = 0.3;
const REVISION_TOO_EARLY_PENALTY: f64 = 3.0;

const BREAK_FATIGUE_RELIEF: f64 = 12.0;
const BREAK_STRESS_RELIEF: f64 = 10.0;
const BREAK_BASE_REWARD: f64 = 1.0;
const BREAK_RETENTION_WEIGHT: f64 = 0.02;
const BREAK_TIRED_THRESHOLD: f64 = 60.0;
const BREAK_TIRED_BONUS: f64 = 5.0;
const BREAK_IDLE_PENALTY: f64 = 2.0;

/// Retention lost every day to natural forgetting.
pub const FORGETTING_RATE: f64 = 0.01;
/// Fatigue or stress above this level counts as burnout.
pub const BURNOUT_THRESHOLD: f64 = 85.0;
const BURNOUT_PENALTY: f64 = 12.0;
const BURNOUT_STUDY_PENALTY: f64 = 8.0;

const TERMINAL_RETENTION_WEIGHT: f64 = 15.0;
/// Days-left threshold at which urgency shaping kicks in.
pub const URGENCY_WINDOW: u32 = 3;
const URGENT_STUDY_BELOW: f64 = 0.6;
const URGENT_STUDY_BONUS: f64 = 5.0;
const URGENT_REVISE_FROM: f64 = 0.7;
const URGENT_REVISE_BONUS: f64 = 3.0;

/// Advance `state` by one day.
///
/// `None` stands for an action code outside the environment's map; like the
/// reserved `Sleep`/`Ignore` actions it leaves the student untouched and only
/// the day-level effects apply. Returns the day's reward and whether the exam
/// has arrived.
pub(crate) fn advance_day(state: &mut RawState, action: Option<Action>) -> (f64, bool) {
    let mut reward = match action {
        Some(Action::Study) => study(state),
        Some(Action::Revise) => revise(state),
        Some(Action::Break) => take_break(state),
        Some(Action::Sleep | Action::Ignore) | None => 0.0,
    };

    state.retention = (state.retention - FORGETTING_RATE).max(0.0);

    if state.fatigue > BURNOUT_THRESHOLD || state.stress > BURNOUT_THRESHOLD {
        reward -= BURNOUT_PENALTY;
        if action == Some(Action::Study) {
            reward -= BURNOUT_STUDY_PENALTY;
        }
    }

    state.days_left = state.days_left.saturating_sub(1);
    let done = state.days_left == 0;

    if done {
        reward += state.retention * TERMINAL_RETENTION_WEIGHT;
    }

    if state.days_left <= URGENCY_WINDOW {
        if state.retention < URGENT_STUDY_BELOW && action == Some(Action::Study) {
            reward += URGENT_STUDY_BONUS;
        }
        if state.retention >= URGENT_REVISE_FROM && action == Some(Action::Revise) {
            reward += URGENT_REVISE_BONUS;
        }
    }

    state.clamp();
    (reward, done)
}

fn study(state: &mut RawState) -> f64 {
    let retention = state.retention;
    let gain = STUDY_BASE_GAIN
        * (1.0 - state.fatigue / MAX_FATIGUE)
        * state.difficulty.study_multiplier();

    state.retention = (retention + gain).min(MAX_RETENTION);
    state.fatigue = (state.fatigue + STUDY_FATIGUE_COST).min(MAX_FATIGUE);
    state.stress = (state.stress + STUDY_STRESS_COST).min(MAX_STRESS);

    let mut reward = gain * STUDY_GAIN_WEIGHT
        - STUDY_FATIGUE_WEIGHT * state.fatigue
        - STUDY_STRESS_WEIGHT * state.stress;
    if retention < STUDY_LOW_RETENTION {
        reward += STUDY_LOW_RETENTION_BONUS;
    }
    if state.retention > STUDY_MASTERED {
        reward -= STUDY_MASTERED_PENALTY;
    }
    reward
}

fn revise(state: &mut RawState) -> f64 {
    let retention = state.retention;

    state.retention = (retention + REVISION_GAIN).min(MAX_RETENTION);
    state.fatigue = (state.fatigue - REVISION_FATIGUE_RELIEF).max(0.0);
    state.stress = (state.stress - REVISION_STRESS_RELIEF).max(0.0);

    let mut reward = REVISION_GAIN * REVISION_GAIN_WEIGHT - REVISION_FATIGUE_WEIGHT * state.fatigue;
    let (low, high) = REVISION_SWEET_SPOT;
    if (low..=high).contains(&retention) {
        reward += REVISION_SWEET_SPOT_BONUS;
    }
    if retention < REVISION_TOO_EARLY {
        reward -= REVISION_TOO_EARLY_PENALTY;
    }
    reward
}

fn take_break(state: &mut RawState) -> f64 {
    let (fatigue, stress) = (state.fatigue, state.stress);

    state.fatigue = (fatigue - BREAK_FATIGUE_RELIEF).max(0.0);
    state.stress = (stress - BREAK_STRESS_RELIEF).max(0.0);

    let mut reward = BREAK_BASE_REWARD - BREAK_RETENTION_WEIGHT * state.retention;
    if fatigue > BREAK_TIRED_THRESHOLD || stress > BREAK_TIRED_THRESHOLD {
        reward += BREAK_TIRED_BONUS;
    } else {
        reward -= BREAK_IDLE_PENALTY;
    }
    reward
}

//! Student exam-preparation environment

use serde::{Deserialize, Serialize};

use super::{
    action::Action,
    dynamics::advance_day,
    state::{Difficulty, RawState},
};

/// Configuration for a [`StudentEnvironment`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Days available before the exam
    pub total_days: u32,
    /// Exam difficulty applied on reset
    pub difficulty: Difficulty,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            total_days: 30,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Outcome of a single environment step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// State after the day's effects
    pub state: RawState,
    pub reward: f64,
    /// Whether the exam day has been reached
    pub done: bool,
}

/// Simulated student preparing for an exam.
///
/// Owns the continuous [`RawState`]; [`reset`](Self::reset) restores the
/// baseline and [`step`](Self::step) applies one day's action.
#[derive(Debug, Clone)]
pub struct StudentEnvironment {
    total_days: u32,
    difficulty: Difficulty,
    current_day: u32,
    state: RawState,
}

impl StudentEnvironment {
    pub fn new(total_days: u32, difficulty: Difficulty) -> Self {
        Self {
            total_days,
            difficulty,
            current_day: 0,
            state: RawState::initial(total_days, difficulty),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(config.total_days, config.difficulty)
    }

    /// Restore the baseline state for a new episode.
    pub fn reset(&mut self) -> RawState {
        self.current_day = 0;
        self.state = RawState::initial(self.total_days, self.difficulty);
        self.state
    }

    /// Apply one day's action.
    pub fn step(&mut self, action: Action) -> Step {
        self.advance(Some(action))
    }

    /// Apply an action given by its integer code.
    ///
    /// Codes outside the action map are accepted and behave like a day on
    /// which the student does nothing.
    pub fn step_code(&mut self, code: i64) -> Step {
        self.advance(Action::from_code(code))
    }

    fn advance(&mut self, action: Option<Action>) -> Step {
        let (reward, done) = advance_day(&mut self.state, action);
        self.current_day += 1;
        Step {
            state: self.state,
            reward,
            done,
        }
    }

    pub fn state(&self) -> &RawState {
        &self.state
    }

    /// Overwrite the current state, e.g. to randomise start conditions.
    pub fn set_state(&mut self, mut state: RawState) {
        state.clamp();
        self.state = state;
    }

    /// Change the difficulty of the running episode and of future resets.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.state.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Days elapsed since the last reset.
    pub fn current_day(&self) -> u32 {
        self.current_day
    }
}

impl Default for StudentEnvironment {
    fn default() -> Self {
        Self::from_config(&EnvironmentConfig::default())
    }
}

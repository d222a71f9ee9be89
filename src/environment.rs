//! Exam-preparation environment
//!
//! Models a student's days before an exam as a Markov decision process:
//! continuous fatigue, stress and retention evolve under daily actions and
//! the environment returns a shaped reward for each day.

pub mod action;
pub mod dynamics;
pub mod state;
pub mod student;

pub use action::{Action, ActionTally, TRAINABLE_ACTIONS, action_meaning};
pub use dynamics::{BURNOUT_THRESHOLD, FORGETTING_RATE, URGENCY_WINDOW};
pub use state::{ALL_DIFFICULTIES, Difficulty, RawState};
pub use student::{EnvironmentConfig, Step, StudentEnvironment};

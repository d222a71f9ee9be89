//! Daily study actions

use std::fmt;

use serde::{Deserialize, Serialize};

/// An action the student can take on a given day.
///
/// Only [`Action::Study`], [`Action::Revise`] and [`Action::Break`] change the
/// student's state. `Sleep` and `Ignore` are reserved labels: stepping with
/// them applies only the day-level effects (forgetting, burnout, time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Study,
    Revise,
    Break,
    Sleep,
    Ignore,
}

/// Actions available to a trained policy, in tie-break order.
pub const TRAINABLE_ACTIONS: [Action; 3] = [Action::Study, Action::Revise, Action::Break];

impl Action {
    /// Integer code used by the environment's action map.
    pub fn code(self) -> i64 {
        match self {
            Action::Study => 0,
            Action::Revise => 1,
            Action::Break => 2,
            Action::Sleep => 3,
            Action::Ignore => 4,
        }
    }

    /// Look up an action by its integer code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Action::Study),
            1 => Some(Action::Revise),
            2 => Some(Action::Break),
            3 => Some(Action::Sleep),
            4 => Some(Action::Ignore),
            _ => None,
        }
    }

    /// Lowercase name from the environment's action map.
    pub fn meaning(self) -> &'static str {
        match self {
            Action::Study => "study",
            Action::Revise => "revise",
            Action::Break => "break",
            Action::Sleep => "sleep",
            Action::Ignore => "ignore",
        }
    }

    /// Human-readable label shown to students.
    pub fn label(self) -> &'static str {
        match self {
            Action::Study => "Study",
            Action::Revise => "Revise",
            Action::Break => "Break",
            Action::Sleep => "Sleep",
            Action::Ignore => "Ignore",
        }
    }

    /// Whether the action is part of the trainable action set.
    pub fn is_trainable(self) -> bool {
        TRAINABLE_ACTIONS.contains(&self)
    }
}

/// Name for an arbitrary action code, `"unknown"` when the code is unmapped.
pub fn action_meaning(code: i64) -> &'static str {
    Action::from_code(code).map_or("unknown", Action::meaning)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-action counters for one or more episodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTally {
    pub study: usize,
    pub revise: usize,
    pub breaks: usize,
    pub other: usize,
}

impl ActionTally {
    pub fn record(&mut self, action: Action) {
        match action {
            Action::Study => self.study += 1,
            Action::Revise => self.revise += 1,
            Action::Break => self.breaks += 1,
            Action::Sleep | Action::Ignore => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.study + self.revise + self.breaks + self.other
    }

    pub fn merge(&mut self, other: &ActionTally) {
        self.study += other.study;
        self.revise += other.revise;
        self.breaks += other.breaks;
        self.other += other.other;
    }
}

impl fmt::Display for ActionTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Study={}, Revise={}, Break={}",
            self.study, self.revise, self.breaks
        )?;
        if self.other > 0 {
            write!(f, ", Other={}", self.other)?;
        }
        Ok(())
    }
}

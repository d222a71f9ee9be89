//! State discretization for the tabular agent
//!
//! Continuous student states are binned into a 5-tuple of labels with fixed
//! thresholds. The discrete state is only used as a value-table key.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::environment::{Difficulty, RawState};

const FATIGUE_BINS: (f64, f64) = (33.0, 66.0);
const STRESS_BINS: (f64, f64) = (33.0, 66.0);
const RETENTION_BINS: (f64, f64) = (0.33, 0.66);
const URGENCY_HIGH_MAX_DAYS: u32 = 2;
const URGENCY_MEDIUM_MAX_DAYS: u32 = 5;

/// Coarse level of a state component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// Bin `value` with strict upper bounds: `[0, low)`, `[low, high)`, `[high, ..]`.
    fn from_bins(value: f64, (low, high): (f64, f64)) -> Self {
        if value < low {
            Level::Low
        } else if value < high {
            Level::Medium
        } else {
            Level::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "LOW",
            Level::Medium => "MEDIUM",
            Level::High => "HIGH",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Level::Low),
            "MEDIUM" => Ok(Level::Medium),
            "HIGH" => Ok(Level::High),
            other => Err(crate::Error::InvalidConfiguration {
                message: format!("unknown level '{other}' (expected low, medium or high)"),
            }),
        }
    }
}

/// Discretized student state used as the value-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiscreteState {
    pub fatigue: Level,
    pub stress: Level,
    pub retention: Level,
    pub urgency: Level,
    pub difficulty: Difficulty,
}

impl DiscreteState {
    pub fn new(
        fatigue: Level,
        stress: Level,
        retention: Level,
        urgency: Level,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            fatigue,
            stress,
            retention,
            urgency,
            difficulty,
        }
    }
}

impl fmt::Display for DiscreteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {})",
            self.fatigue,
            self.stress,
            self.retention,
            self.urgency,
            self.difficulty.label()
        )
    }
}

/// Urgency of the exam given the days remaining.
pub fn urgency(days_left: u32) -> Level {
    if days_left <= URGENCY_HIGH_MAX_DAYS {
        Level::High
    } else if days_left <= URGENCY_MEDIUM_MAX_DAYS {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Map a continuous state onto its discrete key.
pub fn discretize(state: &RawState) -> DiscreteState {
    DiscreteState {
        fatigue: Level::from_bins(state.fatigue, FATIGUE_BINS),
        stress: Level::from_bins(state.stress, STRESS_BINS),
        retention: Level::from_bins(state.retention, RETENTION_BINS),
        urgency: urgency(state.days_left),
        difficulty: state.difficulty,
    }
}

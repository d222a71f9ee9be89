//! Continuous student state

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const MAX_FATIGUE: f64 = 100.0;
pub const MAX_STRESS: f64 = 100.0;
pub const MAX_RETENTION: f64 = 1.0;

/// Exam difficulty, scaling how much a study session teaches.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

pub const ALL_DIFFICULTIES: [Difficulty; 3] =
    [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

impl Difficulty {
    /// Multiplier applied to the study learning gain.
    pub fn study_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.3,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 0.7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Uppercase label used in discretized states.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    /// Parse a difficulty, falling back to `Medium` for unrecognised labels.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            log::warn!("unknown difficulty '{value}', using medium");
            Difficulty::Medium
        })
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(crate::Error::InvalidConfiguration {
                message: format!("unknown difficulty '{other}' (expected easy, medium or hard)"),
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Continuous state of a student preparing for an exam.
///
/// Numeric fields are kept inside their ranges by [`RawState::clamp`], which
/// the environment applies after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawState {
    /// Fatigue in `[0, 100]`
    pub fatigue: f64,
    /// Stress in `[0, 100]`
    pub stress: f64,
    /// Knowledge mastery in `[0, 1]`
    pub retention: f64,
    /// Days remaining before the exam
    pub days_left: u32,
    pub difficulty: Difficulty,
}

impl RawState {
    pub const INITIAL_FATIGUE: f64 = 30.0;
    pub const INITIAL_STRESS: f64 = 20.0;
    pub const INITIAL_RETENTION: f64 = 0.2;

    /// Build a state, clamping the numeric fields.
    pub fn new(
        fatigue: f64,
        stress: f64,
        retention: f64,
        days_left: u32,
        difficulty: Difficulty,
    ) -> Self {
        let mut state = Self {
            fatigue,
            stress,
            retention,
            days_left,
            difficulty,
        };
        state.clamp();
        state
    }

    /// Baseline state at the start of an episode.
    pub fn initial(days_left: u32, difficulty: Difficulty) -> Self {
        Self::new(
            Self::INITIAL_FATIGUE,
            Self::INITIAL_STRESS,
            Self::INITIAL_RETENTION,
            days_left,
            difficulty,
        )
    }

    pub fn clamp(&mut self) {
        self.fatigue = clamp_unit(self.fatigue, MAX_FATIGUE);
        self.stress = clamp_unit(self.stress, MAX_STRESS);
        self.retention = clamp_unit(self.retention, MAX_RETENTION);
    }

    /// Whether every numeric field is inside its declared range.
    pub fn in_range(&self) -> bool {
        (0.0..=MAX_FATIGUE).contains(&self.fatigue)
            && (0.0..=MAX_STRESS).contains(&self.stress)
            && (0.0..=MAX_RETENTION).contains(&self.retention)
    }
}

// NaN inputs collapse to zero so the state stays inside the discretizer's domain.
fn clamp_unit(value: f64, max: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}

impl fmt::Display for RawState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fatigue={:.1} stress={:.1} retention={:.3} days_left={} difficulty={}",
            self.fatigue, self.stress, self.retention, self.days_left, self.difficulty
        )
    }
}

//! Configuration files for CLI commands

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Training settings read from `train --config <file.json>`.
///
/// Every field is optional; command-line flags override file values and file
/// values override the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainFileConfig {
    pub episodes: Option<usize>,
    pub days: Option<u32>,
    pub difficulty: Option<String>,
    pub randomize_start: Option<bool>,
    pub seed: Option<u64>,
    pub alpha: Option<f64>,
    pub gamma: Option<f64>,
    pub epsilon: Option<f64>,
    pub epsilon_decay: Option<f64>,
    pub min_epsilon: Option<f64>,
    pub output: Option<std::path::PathBuf>,
}

impl TrainFileConfig {
    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

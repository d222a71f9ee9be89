//! Saved policy format

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    environment::Action,
    sarsa::{
        agent::{Hyperparameters, SarsaAgent},
        frozen::FrozenPolicy,
        value_table::ValueTable,
    },
};

/// Information about the training run that produced a policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of episodes trained
    pub episodes_trained: Option<usize>,
    /// Days per training episode
    pub total_days: Option<u32>,
    /// Whether start conditions were randomised
    pub randomized_start: Option<bool>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Mean episode reward over training
    pub average_reward: Option<f64>,
    /// Exploration rate when training stopped
    pub final_epsilon: Option<f64>,
    /// Seconds since the Unix epoch when saved
    pub saved_at: Option<String>,
}

impl TrainingMetadata {
    /// Stamp the metadata with the current time.
    pub fn stamped(mut self) -> Self {
        self.saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|elapsed| elapsed.as_secs().to_string());
        self
    }
}

/// A trained value table together with how it was learned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPolicy {
    pub version: u32,
    pub actions: Vec<Action>,
    pub hyperparameters: Hyperparameters,
    pub table: ValueTable,
    pub metadata: TrainingMetadata,
}

impl SavedPolicy {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &SarsaAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            actions: agent.actions().to_vec(),
            hyperparameters: agent.hyperparameters(),
            table: agent.table().clone(),
            metadata,
        }
    }

    fn check_version(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedPolicyVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }

    /// Rebuild a trainable agent, e.g. to continue training.
    pub fn to_agent(&self) -> Result<SarsaAgent> {
        self.check_version()?;
        let agent = SarsaAgent::new(self.actions.clone(), self.hyperparameters)
            .with_table(self.table.clone());
        Ok(agent)
    }

    /// Read-only greedy policy for inference.
    pub fn to_frozen(&self) -> Result<FrozenPolicy> {
        self.check_version()?;
        Ok(FrozenPolicy::new(self.table.clone(), self.actions.clone()))
    }

    /// Consume the save, keeping only the greedy policy.
    pub fn into_frozen(self) -> Result<FrozenPolicy> {
        self.check_version()?;
        Ok(FrozenPolicy::new(self.table, self.actions))
    }
}

//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    environment::{Action, TRAINABLE_ACTIONS},
    sarsa::Hyperparameters,
};

/// Configuration for creating a SARSA agent.
///
/// This type provides a type-safe, builder-style API for configuring agents
/// before creation through the dependency injection container.
///
/// # Examples
///
/// ```
/// use exam_balancer::app::AgentConfig;
///
/// let config = AgentConfig::new()
///     .with_alpha(0.2)
///     .with_epsilon_decay(0.99)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate, discount and exploration schedule
    pub hyperparameters: Hyperparameters,
    /// Actions the agent may choose from
    pub actions: Vec<Action>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with the default schedule over the three
    /// trainable actions and no seed.
    pub fn new() -> Self {
        Self {
            hyperparameters: Hyperparameters::default(),
            actions: TRAINABLE_ACTIONS.to_vec(),
            seed: None,
        }
    }

    pub fn with_hyperparameters(mut self, hyperparameters: Hyperparameters) -> Self {
        self.hyperparameters = hyperparameters;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.hyperparameters.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.hyperparameters.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.hyperparameters.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, decay: f64) -> Self {
        self.hyperparameters.epsilon_decay = decay;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.hyperparameters.min_epsilon = min_epsilon;
        self
    }

    /// Restrict or extend the action set.
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.hyperparameters.validate()?;
        if self.hyperparameters.min_epsilon > self.hyperparameters.epsilon {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "min_epsilon ({}) exceeds epsilon ({})",
                    self.hyperparameters.min_epsilon, self.hyperparameters.epsilon
                ),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_training_schedule() {
        let config = AgentConfig::default();
        assert_eq!(config.hyperparameters.alpha, 0.1);
        assert_eq!(config.hyperparameters.gamma, 0.9);
        assert_eq!(config.hyperparameters.epsilon, 1.0);
        assert_eq!(config.hyperparameters.epsilon_decay, 0.997);
        assert_eq!(config.hyperparameters.min_epsilon, 0.05);
        assert_eq!(config.actions, TRAINABLE_ACTIONS.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AgentConfig::new().with_alpha(1.5).validate().is_err());
        assert!(AgentConfig::new().with_gamma(-0.1).validate().is_err());
        assert!(
            AgentConfig::new()
                .with_epsilon(0.1)
                .with_min_epsilon(0.2)
                .validate()
                .is_err()
        );
    }
}

//! Dependency injection container for the exam balancer.
//!
//! The container owns infrastructure dependencies and provides factory
//! methods for creating agents and loading trained policies.

use std::{path::Path, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    ports::PolicyRepository,
    sarsa::{FrozenPolicy, SarsaAgent, SavedPolicy, TrainingMetadata},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use exam_balancer::app::{App, AgentConfig};
///
/// let app = App::new();
/// let agent = app.create_agent(AgentConfig::new().with_seed(42))?;
/// # Ok::<(), exam_balancer::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use exam_balancer::app::App;
/// use exam_balancer::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for policy persistence
    policy_repository: Arc<dyn PolicyRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses `MsgPackRepository` for policy files and no default seed.
    pub fn new() -> Self {
        Self {
            policy_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the policy repository.
    pub fn policy_repository(&self) -> Arc<dyn PolicyRepository + Send + Sync> {
        Arc::clone(&self.policy_repository)
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Create a fresh SARSA agent.
    ///
    /// The configuration is validated first; its seed takes precedence over
    /// the container default.
    pub fn create_agent(&self, config: AgentConfig) -> Result<SarsaAgent> {
        config.validate()?;
        let agent = SarsaAgent::new(config.actions, config.hyperparameters);

        Ok(match config.seed.or(self.default_seed) {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        })
    }

    /// Save an agent's value table together with training metadata.
    ///
    /// ```no_run
    /// use exam_balancer::app::{App, AgentConfig};
    /// use exam_balancer::sarsa::TrainingMetadata;
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let agent = app.create_agent(AgentConfig::new())?;
    ///
    /// // Train the agent...
    ///
    /// app.save_agent(&agent, TrainingMetadata::default(), Path::new("trained_policy.msgpack"))?;
    /// # Ok::<(), exam_balancer::Error>(())
    /// ```
    pub fn save_agent(
        &self,
        agent: &SarsaAgent,
        metadata: TrainingMetadata,
        path: &Path,
    ) -> Result<()> {
        let policy = SavedPolicy::from_agent(agent, metadata.stamped());
        self.policy_repository.save(&policy, path)?;
        log::info!(
            "saved policy with {} learned states to {}",
            policy.table.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a saved policy file as-is.
    pub fn load_saved(&self, path: &Path) -> Result<SavedPolicy> {
        self.policy_repository.load(path)
    }

    /// Load a read-only greedy policy for inference.
    ///
    /// Fails with [`Error::MissingPolicy`](crate::Error::MissingPolicy) when
    /// nothing has been trained at `path`.
    pub fn load_policy(&self, path: &Path) -> Result<FrozenPolicy> {
        let policy = self.load_saved(path)?.into_frozen()?;
        log::debug!(
            "loaded frozen policy with {} states from {}",
            policy.table().len(),
            path.display()
        );
        Ok(policy)
    }

    /// Load a saved policy as a trainable agent to continue learning.
    pub fn load_agent(&self, path: &Path) -> Result<SarsaAgent> {
        let agent = self.load_saved(path)?.to_agent()?;
        Ok(match self.default_seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// Primarily used for testing to inject in-memory repositories and control
/// randomness.
pub struct AppBuilder {
    policy_repository: Option<Arc<dyn PolicyRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            policy_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom policy repository.
    pub fn with_repository<R: PolicyRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.policy_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no repository was specified, uses `MsgPackRepository` by default.
    pub fn build(self) -> App {
        App {
            policy_repository: self
                .policy_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        adapters::InMemoryRepository,
        discretizer::{DiscreteState, Level},
        environment::{Action, Difficulty},
    };

    #[test]
    fn test_app_creates_agent() {
        let app = App::new();
        let agent = app.create_agent(AgentConfig::new()).unwrap();
        assert_eq!(agent.epsilon(), 1.0);
        assert!(agent.table().is_empty());
    }

    #[test]
    fn test_app_applies_default_seed() {
        let app = App::for_testing().with_default_seed(42).build();
        let agent = app.create_agent(AgentConfig::new()).unwrap();
        assert_eq!(agent.rng_seed(), Some(42));
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(42).build();
        let agent = app.create_agent(AgentConfig::new().with_seed(123)).unwrap();
        assert_eq!(agent.rng_seed(), Some(123));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let app = App::new();
        let result = app.create_agent(AgentConfig::new().with_alpha(2.0));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_save_then_load_policy() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let state = DiscreteState::new(
            Level::High,
            Level::High,
            Level::Medium,
            Level::Low,
            Difficulty::Hard,
        );
        let mut table = crate::sarsa::ValueTable::new();
        table.set(state, Action::Break, 2.5);
        let agent = app.create_agent(AgentConfig::new()).unwrap().with_table(table);

        let path = Path::new("policy");
        app.save_agent(&agent, TrainingMetadata::default(), path).unwrap();

        let policy = app.load_policy(path).unwrap();
        assert_eq!(policy.best_action(&state), Action::Break);
        assert!(app.load_saved(path).unwrap().metadata.saved_at.is_some());
    }

    #[test]
    fn test_load_agent_resumes_from_saved_table() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .with_default_seed(3)
            .build();
        let state = DiscreteState::new(
            Level::Low,
            Level::Medium,
            Level::Low,
            Level::High,
            Difficulty::Easy,
        );
        let mut table = crate::sarsa::ValueTable::new();
        table.set(state, Action::Revise, 1.5);
        let agent = app
            .create_agent(AgentConfig::new().with_alpha(0.25))
            .unwrap()
            .with_table(table);
        app.save_agent(&agent, TrainingMetadata::default(), Path::new("resume"))
            .unwrap();

        let resumed = app.load_agent(Path::new("resume")).unwrap();
        assert_eq!(resumed.table(), agent.table());
        assert_eq!(resumed.alpha(), 0.25);
        assert_eq!(resumed.rng_seed(), Some(3));
    }

    #[test]
    fn test_missing_policy_is_reported() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let result = app.load_policy(Path::new("never-trained"));
        assert!(matches!(result, Err(Error::MissingPolicy { .. })));
    }
}

//! Learner port - abstraction over action-selecting agents
//!
//! The training pipeline and the simulator drive any implementation of this
//! trait: the learning SARSA agent as well as frozen, read-only policies.

use crate::{discretizer::DiscreteState, environment::Action};

/// Learner trait - unified interface for trainable and frozen policies
///
/// # Examples
///
/// ```no_run
/// use exam_balancer::{
///     discretizer::discretize,
///     environment::StudentEnvironment,
///     ports::Learner,
/// };
///
/// fn first_move<L: Learner>(learner: &mut L, env: &mut StudentEnvironment) {
///     let state = discretize(&env.reset());
///     let _action = learner.choose_action(&state);
/// }
/// ```
pub trait Learner: Send {
    /// Select an action for the given discrete state.
    fn choose_action(&mut self, state: &DiscreteState) -> Action;

    /// Apply an on-policy temporal difference update.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for frozen policies.
    fn update(
        &mut self,
        _state: &DiscreteState,
        _action: Action,
        _reward: f64,
        _next_state: &DiscreteState,
        _next_action: Action,
    ) {
    }

    /// Called once after every training episode (exploration decay).
    fn end_episode(&mut self) {}

    /// Get the learner's name.
    ///
    /// Used for identification in reports and logging.
    fn name(&self) -> &str;

    /// Current probability of picking a random action.
    fn exploration_rate(&self) -> f64 {
        0.0
    }

    /// Number of discrete states the learner holds estimates for.
    fn learned_states(&self) -> usize {
        0
    }

    /// Seed the learner's internal random number generator.
    ///
    /// Training pipelines call this method when supplied with a deterministic
    /// seed. Stateless learners can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

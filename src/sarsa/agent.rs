//! SARSA agent (on-policy TD control)
//!
//! Learns Q^π for the ε-greedy policy it follows. Exploration decays once per
//! episode toward a floor.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    discretizer::DiscreteState,
    environment::{Action, TRAINABLE_ACTIONS},
    ports::Learner,
    sarsa::value_table::ValueTable,
};

/// Learning hyperparameters of a SARSA agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Initial exploration rate ε
    pub epsilon: f64,
    /// Multiplicative ε decay per episode
    pub epsilon_decay: f64,
    /// Floor for ε
    pub min_epsilon: f64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 1.0,
            epsilon_decay: 0.997,
            min_epsilon: 0.05,
        }
    }
}

impl Hyperparameters {
    /// Check that every parameter lies in its meaningful range.
    pub fn validate(&self) -> crate::Result<()> {
        let checks = [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
            ("epsilon_decay", self.epsilon_decay),
            ("min_epsilon", self.min_epsilon),
        ];
        for (name, value) in checks {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular SARSA agent.
#[derive(Debug, Clone)]
pub struct SarsaAgent {
    table: ValueTable,
    actions: Vec<Action>,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl SarsaAgent {
    /// Create an agent over `actions`.
    ///
    /// An empty action set falls back to [`TRAINABLE_ACTIONS`].
    pub fn new(actions: Vec<Action>, params: Hyperparameters) -> Self {
        let actions = if actions.is_empty() {
            TRAINABLE_ACTIONS.to_vec()
        } else {
            actions
        };
        Self {
            table: ValueTable::new(),
            actions,
            alpha: params.alpha,
            gamma: params.gamma,
            epsilon: params.epsilon,
            initial_epsilon: params.epsilon,
            epsilon_decay: params.epsilon_decay,
            min_epsilon: params.min_epsilon,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Start from previously learned estimates.
    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.table = table;
        self
    }

    /// ε-greedy action selection.
    ///
    /// Exploitation inserts a zero row for unseen states before taking the
    /// argmax, so an unseen state picks the lowest-coded action.
    pub fn choose_action(&mut self, state: &DiscreteState) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            if let Some(&action) = self.actions.choose(&mut self.rng) {
                return action;
            }
        }
        self.table
            .row_or_insert(state, &self.actions)
            .best_action(&self.actions)
            .unwrap_or(Action::Study)
    }

    /// SARSA update: Q(s,a) ← Q(s,a) + α[r + γ Q(s',a') − Q(s,a)]
    pub fn update(
        &mut self,
        state: &DiscreteState,
        action: Action,
        reward: f64,
        next_state: &DiscreteState,
        next_action: Action,
    ) {
        let next_q = self
            .table
            .row_or_insert(next_state, &self.actions)
            .value(next_action);
        let row = self.table.row_or_insert(state, &self.actions);
        let current_q = row.value(action);
        let td_error = reward + self.gamma * next_q - current_q;
        row.set(action, current_q + self.alpha * td_error);
    }

    /// Decay epsilon after an episode.
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Override the exploration rate, e.g. `0.0` for pure greedy play.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn into_table(self) -> ValueTable {
        self.table
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Hyperparameters the agent was created with.
    pub fn hyperparameters(&self) -> Hyperparameters {
        Hyperparameters {
            alpha: self.alpha,
            gamma: self.gamma,
            epsilon: self.initial_epsilon,
            epsilon_decay: self.epsilon_decay,
            min_epsilon: self.min_epsilon,
        }
    }

    /// Forget everything learned and restore the initial exploration rate.
    pub fn reset(&mut self) {
        self.table.clear();
        self.epsilon = self.initial_epsilon;
        self.rng = build_rng(self.rng_seed);
    }
}

impl Learner for SarsaAgent {
    fn choose_action(&mut self, state: &DiscreteState) -> Action {
        SarsaAgent::choose_action(self, state)
    }

    fn update(
        &mut self,
        state: &DiscreteState,
        action: Action,
        reward: f64,
        next_state: &DiscreteState,
        next_action: Action,
    ) {
        SarsaAgent::update(self, state, action, reward, next_state, next_action);
    }

    fn end_episode(&mut self) {
        self.decay_epsilon();
    }

    fn name(&self) -> &str {
        "SARSA"
    }

    fn exploration_rate(&self) -> f64 {
        self.epsilon
    }

    fn learned_states(&self) -> usize {
        self.table.len()
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{discretizer::Level, environment::Difficulty};

    fn state(retention: Level) -> DiscreteState {
        DiscreteState::new(
            Level::Low,
            Level::Low,
            retention,
            Level::Low,
            Difficulty::Medium,
        )
    }

    fn greedy_agent() -> SarsaAgent {
        SarsaAgent::new(
            TRAINABLE_ACTIONS.to_vec(),
            Hyperparameters {
                epsilon: 0.0,
                ..Hyperparameters::default()
            },
        )
        .with_seed(7)
    }

    #[test]
    fn test_sarsa_update_exact() {
        let mut agent = SarsaAgent::new(
            TRAINABLE_ACTIONS.to_vec(),
            Hyperparameters {
                alpha: 0.5,
                gamma: 0.9,
                ..Hyperparameters::default()
            },
        );
        let s = state(Level::Low);
        let next = state(Level::Medium);
        agent.table.set(s, Action::Study, 1.0);
        agent.table.set(s, Action::Revise, -2.0);
        agent.table.set(s, Action::Break, 0.25);
        agent.table.set(next, Action::Revise, 4.0);

        agent.update(&s, Action::Study, 3.0, &next, Action::Revise);

        // 1.0 + 0.5 * (3.0 + 0.9 * 4.0 - 1.0)
        let expected = 1.0 + 0.5 * (3.0 + 0.9 * 4.0 - 1.0);
        assert_eq!(agent.table.get(&s, Action::Study), Some(expected));
        assert_eq!(agent.table.get(&s, Action::Revise), Some(-2.0));
        assert_eq!(agent.table.get(&s, Action::Break), Some(0.25));
        assert_eq!(agent.table.get(&next, Action::Revise), Some(4.0));
    }

    #[test]
    fn test_update_creates_missing_rows() {
        let mut agent = greedy_agent();
        let s = state(Level::Low);
        let next = state(Level::High);
        agent.update(&s, Action::Break, 2.0, &next, Action::Study);

        assert_eq!(agent.table().len(), 2);
        assert_eq!(agent.table().get(&s, Action::Break), Some(0.1 * 2.0));
        assert_eq!(agent.table().get(&next, Action::Study), Some(0.0));
        assert_eq!(agent.table().get(&next, Action::Break), Some(0.0));
    }

    #[test]
    fn test_greedy_is_deterministic() {
        let mut agent = greedy_agent();
        let s = state(Level::Low);
        agent.table.set(s, Action::Study, 0.1);
        agent.table.set(s, Action::Revise, 0.2);
        agent.table.set(s, Action::Break, 0.9);
        for _ in 0..50 {
            assert_eq!(agent.choose_action(&s), Action::Break);
        }
    }

    #[test]
    fn test_unseen_state_initialised_on_greedy_choice() {
        let mut agent = greedy_agent();
        let s = state(Level::Medium);
        assert_eq!(agent.choose_action(&s), Action::Study);
        assert!(agent.table().contains(&s));
    }

    #[test]
    fn test_full_exploration_stays_in_action_set() {
        let mut agent = SarsaAgent::new(
            vec![Action::Revise, Action::Break],
            Hyperparameters::default(),
        )
        .with_seed(3);
        let s = state(Level::Low);
        let mut seen_revise = false;
        let mut seen_break = false;
        for _ in 0..200 {
            match agent.choose_action(&s) {
                Action::Revise => seen_revise = true,
                Action::Break => seen_break = true,
                other => panic!("unexpected action {other:?}"),
            }
        }
        assert!(seen_revise && seen_break);
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let mut agent = SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), Hyperparameters::default());
        agent.decay_epsilon();
        assert!((agent.epsilon() - 0.997).abs() < 1e-12);
        for _ in 0..5000 {
            agent.decay_epsilon();
        }
        assert_eq!(agent.epsilon(), 0.05);
    }

    #[test]
    fn test_reset_clears_table() {
        let mut agent = greedy_agent();
        agent.update(
            &state(Level::Low),
            Action::Study,
            1.0,
            &state(Level::Low),
            Action::Study,
        );
        agent.set_epsilon(0.3);
        agent.reset();
        assert!(agent.table().is_empty());
        assert_eq!(agent.epsilon(), 0.0);
    }

    #[test]
    fn test_hyperparameter_validation() {
        assert!(Hyperparameters::default().validate().is_ok());
        let bad = Hyperparameters {
            alpha: 1.5,
            ..Hyperparameters::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_empty_action_set_falls_back() {
        let agent = SarsaAgent::new(Vec::new(), Hyperparameters::default());
        assert_eq!(agent.actions(), &TRAINABLE_ACTIONS);
    }
}

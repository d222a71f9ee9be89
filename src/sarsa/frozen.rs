//! Read-only greedy policy over a trained value table

use std::sync::Arc;

use crate::{
    discretizer::DiscreteState,
    environment::{Action, TRAINABLE_ACTIONS},
    ports::Learner,
    sarsa::value_table::{ActionValues, ValueTable},
};

/// Greedy policy backed by an immutable, shareable value table.
///
/// Cloning is cheap and clones share the same table, so a single loaded
/// policy can serve concurrent lookups. Unseen states are never inserted;
/// they read as all-zero rows.
#[derive(Debug, Clone)]
pub struct FrozenPolicy {
    table: Arc<ValueTable>,
    actions: Vec<Action>,
}

impl FrozenPolicy {
    pub fn new(table: ValueTable, actions: Vec<Action>) -> Self {
        let actions = if actions.is_empty() {
            TRAINABLE_ACTIONS.to_vec()
        } else {
            actions
        };
        Self {
            table: Arc::new(table),
            actions,
        }
    }

    /// Greedy action for `state`.
    pub fn best_action(&self, state: &DiscreteState) -> Action {
        self.table
            .greedy_action(state, &self.actions)
            .unwrap_or(Action::Study)
    }

    pub fn values(&self, state: &DiscreteState) -> Option<&ActionValues> {
        self.table.row(state)
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl Learner for FrozenPolicy {
    fn choose_action(&mut self, state: &DiscreteState) -> Action {
        self.best_action(state)
    }

    fn name(&self) -> &str {
        "Frozen SARSA"
    }

    fn learned_states(&self) -> usize {
        self.table.len()
    }
}

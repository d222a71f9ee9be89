//! Value table for tabular temporal difference learning

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{discretizer::DiscreteState, environment::Action};

/// Action-value estimates for a single discrete state.
///
/// Entries iterate in action-code order, which fixes the greedy tie-break:
/// among equal values the action with the lowest code wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionValues(BTreeMap<Action, f64>);

impl ActionValues {
    /// Row with a zero estimate for each action.
    pub fn zeros(actions: &[Action]) -> Self {
        Self(actions.iter().map(|&action| (action, 0.0)).collect())
    }

    pub fn get(&self, action: Action) -> Option<f64> {
        self.0.get(&action).copied()
    }

    /// Estimate for `action`, zero if the row has no entry for it.
    pub fn value(&self, action: Action) -> f64 {
        self.get(action).unwrap_or(0.0)
    }

    pub fn set(&mut self, action: Action, value: f64) {
        self.0.insert(action, value);
    }

    /// Highest-valued action among `actions`, lowest code on ties.
    ///
    /// Actions without an entry count as zero. Returns `None` only when
    /// `actions` is empty.
    pub fn best_action(&self, actions: &[Action]) -> Option<Action> {
        let mut candidates: Vec<Action> = actions.to_vec();
        candidates.sort_unstable();
        candidates.dedup();

        let mut best: Option<(Action, f64)> = None;
        for action in candidates {
            let value = self.value(action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        self.0.iter().map(|(&action, &value)| (action, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Serialized form of one table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRow {
    pub state: DiscreteState,
    pub values: ActionValues,
}

/// Mapping from discrete state to action-value estimates.
///
/// Rows are created on first access with a zero estimate per action and are
/// never removed, so the table only grows during training. Serialized as a
/// list of rows so that both MessagePack and JSON can carry it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ValueRow>", into = "Vec<ValueRow>")]
pub struct ValueTable {
    rows: BTreeMap<DiscreteState, ActionValues>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, state: &DiscreteState) -> Option<&ActionValues> {
        self.rows.get(state)
    }

    /// Row for `state`, inserting zeros for `actions` if it has not been seen.
    pub fn row_or_insert(&mut self, state: &DiscreteState, actions: &[Action]) -> &mut ActionValues {
        self.rows
            .entry(*state)
            .or_insert_with(|| ActionValues::zeros(actions))
    }

    /// Estimate for a state-action pair, if recorded.
    pub fn get(&self, state: &DiscreteState, action: Action) -> Option<f64> {
        self.rows.get(state).and_then(|row| row.get(action))
    }

    /// Estimate for a state-action pair, zero when unseen.
    pub fn value(&self, state: &DiscreteState, action: Action) -> f64 {
        self.get(state, action).unwrap_or(0.0)
    }

    pub fn set(&mut self, state: DiscreteState, action: Action, value: f64) {
        self.rows.entry(state).or_default().set(action, value);
    }

    /// Greedy action without touching the table; unseen states read as zeros.
    pub fn greedy_action(&self, state: &DiscreteState, actions: &[Action]) -> Option<Action> {
        match self.rows.get(state) {
            Some(row) => row.best_action(actions),
            None => ActionValues::default().best_action(actions),
        }
    }

    pub fn contains(&self, state: &DiscreteState) -> bool {
        self.rows.contains_key(state)
    }

    /// Number of discrete states with a row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DiscreteState, &ActionValues)> {
        self.rows.iter()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl From<Vec<ValueRow>> for ValueTable {
    fn from(rows: Vec<ValueRow>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| (row.state, row.values))
                .collect(),
        }
    }
}

impl From<ValueTable> for Vec<ValueRow> {
    fn from(table: ValueTable) -> Self {
        table
            .rows
            .into_iter()
            .map(|(state, values)| ValueRow { state, values })
            .collect()
    }
}

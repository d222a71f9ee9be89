//! Export functionality for analysis
//!
//! Currently supports CSV export of the per-episode reward curve.

mod rewards_csv;

pub use rewards_csv::{DEFAULT_WINDOW, RewardCsvExporter, RewardRecord, moving_average};

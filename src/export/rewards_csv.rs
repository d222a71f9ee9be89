//! CSV export of the training reward curve
//!
//! One row per episode with its total reward and, once enough episodes have
//! accumulated, the moving average over the preceding window.

use std::path::Path;

use serde::Serialize;

use crate::Result;

/// Smoothing window used for the reward curve.
pub const DEFAULT_WINDOW: usize = 20;

/// A single row in the reward CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardRecord {
    pub episode: usize,
    pub reward: f64,
    /// Mean of this and the previous `window - 1` rewards; empty until the
    /// first full window
    pub moving_average: Option<f64>,
}

/// Moving average over full windows only.
///
/// The result has `values.len() - window + 1` entries; the first one covers
/// `values[..window]`. Returns an empty vector when there are fewer values
/// than `window` or `window` is zero.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Exporter for reward curve CSV files
pub struct RewardCsvExporter {
    window: usize,
}

impl Default for RewardCsvExporter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl RewardCsvExporter {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Pair every episode reward with its smoothed value.
    pub fn records(&self, rewards: &[f64]) -> Vec<RewardRecord> {
        let smoothed = moving_average(rewards, self.window);
        let offset = self.window.saturating_sub(1);

        rewards
            .iter()
            .enumerate()
            .map(|(episode, &reward)| RewardRecord {
                episode: episode + 1,
                reward,
                moving_average: episode
                    .checked_sub(offset)
                    .and_then(|i| smoothed.get(i).copied()),
            })
            .collect()
    }

    /// Write the reward curve to `path`, returning the number of rows.
    pub fn export(&self, rewards: &[f64], path: &Path) -> Result<usize> {
        let mut writer = csv::Writer::from_path(path)?;
        let records = self.records(rewards);
        for record in &records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        log::debug!("wrote {} reward rows to {path:?}", records.len());
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_moving_average_valid_mode() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(moving_average(&values, 2), vec![1.5, 2.5, 3.5, 4.5]);
        assert_eq!(moving_average(&values, 5), vec![3.0]);
        assert!(moving_average(&values, 6).is_empty());
        assert!(moving_average(&values, 0).is_empty());
    }

    #[test]
    fn test_records_align_average_with_window_end() {
        let exporter = RewardCsvExporter::new(3);
        let records = exporter.records(&[3.0, 6.0, 9.0, 0.0]);

        assert_eq!(records[0].moving_average, None);
        assert_eq!(records[1].moving_average, None);
        assert_eq!(records[2].moving_average, Some(6.0));
        assert_eq!(records[3].moving_average, Some(5.0));
        assert_eq!(records[3].episode, 4);
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rewards.csv");

        let rows = RewardCsvExporter::new(2)
            .export(&[1.0, 3.0, 5.0], &path)
            .unwrap();
        assert_eq!(rows, 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[0], "episode,reward,moving_average");
        assert_eq!(lines[1], "1,1.0,");
        assert_eq!(lines[2], "2,3.0,2.0");
        assert_eq!(lines.len(), 4);
    }
}

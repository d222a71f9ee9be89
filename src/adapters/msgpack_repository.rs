//! MessagePack implementation of the policy repository.
//!
//! This adapter implements the PolicyRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::PolicyRepository, sarsa::SavedPolicy};

/// MessagePack-based policy repository.
///
/// # Examples
///
/// ```no_run
/// use exam_balancer::adapters::MsgPackRepository;
/// use exam_balancer::ports::PolicyRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let policy = repo.load(Path::new("trained_policy.msgpack"))?;
/// repo.save(&policy, Path::new("backup.msgpack"))?;
/// # Ok::<(), exam_balancer::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl PolicyRepository for MsgPackRepository {
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, policy).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize policy to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;

        log::debug!("saved policy with {} states to {path:?}", policy.table.len());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let file = File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::MissingPolicy {
                path: path.to_path_buf(),
            },
            _ => Error::Io {
                operation: format!("open file {path:?}"),
                source,
            },
        })?;

        let policy: SavedPolicy = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize policy from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;

        log::debug!("loaded policy with {} states from {path:?}", policy.table.len());
        Ok(policy)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        discretizer::{DiscreteState, Level},
        environment::{Action, Difficulty},
        sarsa::{SarsaAgent, TrainingMetadata},
    };

    fn sample_policy() -> SavedPolicy {
        let agent = SarsaAgent::new(Vec::new(), Default::default()).with_table({
            let mut table = crate::sarsa::ValueTable::new();
            let state = DiscreteState::new(
                Level::Medium,
                Level::Low,
                Level::High,
                Level::Medium,
                Difficulty::Easy,
            );
            table.set(state, Action::Study, 1.25);
            table.set(state, Action::Revise, -0.375);
            table
        });
        SavedPolicy::from_agent(&agent, TrainingMetadata::default())
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("policy.msgpack");

        let repo = MsgPackRepository::new();
        let policy = sample_policy();

        repo.save(&policy, &file_path).expect("Failed to save");
        assert!(repo.exists(&file_path));
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, policy);
    }

    #[test]
    fn test_load_nonexistent_is_missing_policy() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new();
        let result = repo.load(&temp_dir.path().join("absent.msgpack"));
        assert!(matches!(result, Err(Error::MissingPolicy { .. })));
    }

    #[test]
    fn test_load_corrupted_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("garbage.msgpack");
        std::fs::write(&file_path, b"not a policy").unwrap();

        let repo = MsgPackRepository::new();
        assert!(matches!(
            repo.load(&file_path),
            Err(Error::SerializationContext { .. })
        ));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.save(&sample_policy(), Path::new("/invalid_dir_12345/policy.msgpack"));
        assert!(result.is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_save_reports_failed_flush() {
        // Opening succeeds but every write fails with ENOSPC.
        let repo = MsgPackRepository::new();
        let result = repo.save(&sample_policy(), Path::new("/dev/full"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}

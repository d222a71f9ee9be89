//! In-memory policy repository for testing.
//!
//! This adapter provides a pure in-memory implementation of PolicyRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::PolicyRepository, sarsa::SavedPolicy};

/// In-memory repository for testing.
///
/// Stores encoded policies in a shared map keyed by path. Clones share the
/// same storage.
///
/// # Examples
///
/// ```
/// use exam_balancer::adapters::InMemoryRepository;
/// use exam_balancer::ports::PolicyRepository;
/// use exam_balancer::sarsa::{Hyperparameters, SarsaAgent, SavedPolicy, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let agent = SarsaAgent::new(Vec::new(), Hyperparameters::default());
/// let policy = SavedPolicy::from_agent(&agent, TrainingMetadata::default());
///
/// repo.save(&policy, Path::new("policy"))?;
/// let loaded = repo.load(Path::new("policy"))?;
/// assert_eq!(loaded, policy);
/// # Ok::<(), exam_balancer::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another test thread panicked mid-insert;
    // the map itself is still usable.
    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the number of policies currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored policies.
    pub fn clear(&self) {
        self.storage().clear();
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }
}

impl PolicyRepository for InMemoryRepository {
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(policy).map_err(|e| Error::SerializationContext {
            operation: "serialize policy for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(Self::key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let storage = self.storage();
        let bytes = storage
            .get(&Self::key(path))
            .ok_or_else(|| Error::MissingPolicy {
                path: path.to_path_buf(),
            })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize policy from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }
}

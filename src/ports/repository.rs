//! Repository port for policy persistence.
//!
//! This module defines the trait boundary between the domain and infrastructure
//! layers for storing and retrieving trained policies.

use std::path::Path;

use crate::{Result, sarsa::SavedPolicy};

/// Port for persisting and loading trained policies.
///
/// # Examples
///
/// ```no_run
/// use exam_balancer::ports::PolicyRepository;
/// use exam_balancer::sarsa::SavedPolicy;
/// use std::path::Path;
///
/// fn save_policy<R: PolicyRepository>(
///     repo: &R,
///     policy: &SavedPolicy,
///     path: &Path,
/// ) -> exam_balancer::Result<()> {
///     repo.save(policy, path)
/// }
/// ```
pub trait PolicyRepository {
    /// Save a policy to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization fails.
    fn save(&self, policy: &SavedPolicy, path: &Path) -> Result<()>;

    /// Load a policy from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingPolicy`] if nothing is stored at `path`,
    /// or a serialization error if the stored data is corrupted.
    fn load(&self, path: &Path) -> Result<SavedPolicy>;

    /// Whether a policy is stored at `path`.
    fn exists(&self, path: &Path) -> bool;
}

//! Subcommand implementations

use std::path::Path;

use anyhow::{Result, anyhow};

use crate::{Error, app::App, sarsa::FrozenPolicy};

pub mod evaluate;
pub mod inspect;
pub mod recommend;
pub mod simulate;
pub mod train;

/// Turn a missing policy file into a hint to train first.
pub(crate) fn policy_context<T>(result: crate::Result<T>, path: &Path) -> Result<T> {
    result.map_err(|e| match e {
        Error::MissingPolicy { .. } => anyhow!(
            "No trained policy at {}; run `exam-balancer train` first",
            path.display()
        ),
        other => anyhow!(other).context(format!("Failed to load policy {}", path.display())),
    })
}

pub(crate) fn load_policy(app: &App, path: &Path) -> Result<FrozenPolicy> {
    policy_context(app.load_policy(path), path)
}

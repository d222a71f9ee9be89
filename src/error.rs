//! Error types for the exam balancer crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the exam balancer crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("no trained policy found at {path:?}; run `exam-balancer train` first")]
    MissingPolicy { path: PathBuf },

    #[error("unsupported policy format version {found} (expected {expected})")]
    UnsupportedPolicyVersion { found: u32, expected: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

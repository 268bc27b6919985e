//! Error types for the ola-plugin-id-gen crate.

use std::path::PathBuf;

/// Errors that can occur while generating `plugin_id.h`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The protocol-definition file is missing or unreadable.
    #[error("failed to read {path}: {source}")]
    InputNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The generated header or manifest could not be written into place.
    #[error("failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The existing header could not be read back for comparison.
    #[error("failed to read existing {path}: {source}")]
    OutputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `--check` found a header that does not match the current input.
    #[error("{path} is out of date; rerun the generator")]
    Stale { path: PathBuf },

    /// Manifest serialization error.
    #[error("failed to serialize manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

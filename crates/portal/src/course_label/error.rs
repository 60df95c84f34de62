//! Error types for loading the policy table.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the policy table from disk.
#[derive(Debug, Error)]
pub enum PolicyConfigError {
    /// The policy file could not be read
    #[error("Failed to read policy file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The policy file is not a valid policy table
    #[error("Invalid policy file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PolicyConfigError {
    /// Returns true if the policy file does not exist.
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            PolicyConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

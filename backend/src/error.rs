//! Error types
//!
//! The simulation operations themselves cannot fail: acting on an unknown
//! id is a no-op. Errors only come from the edges, i.e. loading and
//! validating configuration and restoring snapshots.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Invalid config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Snapshot config hash mismatch: expected {expected}, got {actual}")]
    SnapshotMismatch { expected: String, actual: String },

    #[error("Snapshot validation failed: {0}")]
    SnapshotInvalid(String),
}

impl From<serde_json::Error> for ScenarioError {
    fn from(err: serde_json::Error) -> Self {
        ScenarioError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_lists_every_error() {
        let err = ScenarioError::InvalidConfig(vec![
            "duration must be positive".to_string(),
            "challengeId is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid config: duration must be positive; challengeId is required"
        );
    }
}

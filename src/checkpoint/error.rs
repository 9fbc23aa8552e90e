//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a machine checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("JSON checkpoint encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary checkpoint encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint names a state the target machine never registered
    #[error("Checkpoint state '{name}' is not registered in this machine")]
    UnknownState { name: String },
}

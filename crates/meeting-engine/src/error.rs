//! Error types for meeting-engine operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the upstream event-fetch collaborator.
///
/// Serializes to exactly `{"error": "..."}` so it can be handed back to the
/// caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{error}")]
pub struct FetchError {
    pub error: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Upstream(#[from] FetchError),
}

/// Errors raised while loading a preferences file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;

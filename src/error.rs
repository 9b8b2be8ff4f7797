//! Crate error type

use thiserror::Error;

/// Errors surfaced by the game core.
///
/// Nearly everything at runtime is infallible; these cover startup
/// (catalog and settings validation) and catalog lookups.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("level index {index} out of range (catalog has {len} levels)")]
    LevelOutOfRange { index: usize, len: usize },

    #[error("level catalog is empty")]
    EmptyCatalog,

    #[error("invalid definition for level {level}: {reason}")]
    InvalidLevelDefinition { level: usize, reason: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    pub fn invalid_level(level: usize, reason: impl Into<String>) -> Self {
        Self::InvalidLevelDefinition {
            level,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

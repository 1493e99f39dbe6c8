use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The store file exists but is unreadable or malformed, or could not be created.
    #[error("failed to initialize store at {path}: {reason}")]
    Init { path: PathBuf, reason: String },

    /// Write-through to disk failed. The in-memory state was left unchanged.
    #[error("failed to persist store: {0}")]
    Persistence(String),

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("email already in use: {0}")]
    EmailTaken(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

impl DbError {
    pub(crate) fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

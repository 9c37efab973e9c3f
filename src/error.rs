/// Error types for commit-scopes
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for commit-scopes operations
#[derive(Error, Debug)]
pub enum ScopeError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The scope database could not be opened or created
    #[error("Scope storage unavailable at {path}: {reason}")]
    StorageUnavailable { path: PathBuf, reason: String },

    /// Saving a scope failed after the store was opened
    #[error("Failed to save scope: {0}")]
    StorageWrite(String),

    /// No project name could be derived for the working directory
    #[error("Could not resolve a project name for: {0}")]
    ProjectNotResolved(String),

    /// Reading an answer from the terminal failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A hook we did not write is already installed
    #[error("A prepare-commit-msg hook already exists at {0}")]
    HookConflict(PathBuf),
}

/// Result type alias for commit-scopes operations
pub type Result<T> = std::result::Result<T, ScopeError>;

impl From<dialoguer::Error> for ScopeError {
    fn from(err: dialoguer::Error) -> Self {
        ScopeError::Prompt(err.to_string())
    }
}

/// Convert ScopeError to a user-friendly error message
impl ScopeError {
    pub fn user_message(&self) -> String {
        match self {
            ScopeError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            ScopeError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            ScopeError::Git(e) => {
                format!("Git operation failed. Details: {}", e)
            }
            ScopeError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            ScopeError::StorageUnavailable { path, .. } => {
                format!(
                    "Scope cache at {} is unavailable; scopes will not be remembered",
                    path.display()
                )
            }
            ScopeError::StorageWrite(msg) => {
                format!("Scope was not remembered: {}", msg)
            }
            ScopeError::ProjectNotResolved(path) => {
                format!("Could not work out the project for: {}", path)
            }
            ScopeError::Prompt(msg) => {
                format!("Could not read input: {}", msg)
            }
            ScopeError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            ScopeError::HookConflict(path) => {
                format!(
                    "{} was not written by commit-scopes. Re-run with --force to replace it.",
                    path.display()
                )
            }
        }
    }

    /// Whether this error only means the scope cache is degraded
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            ScopeError::StorageUnavailable { .. } | ScopeError::StorageWrite(_)
        )
    }
}

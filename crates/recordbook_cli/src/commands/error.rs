//! CLI error types.

use recordbook_core::{NotAnObject, StoreError, UnknownEntityKind};
use recordbook_storage::StorageError;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The data directory could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A record argument was not valid JSON.
    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record argument was valid JSON but not an object.
    #[error(transparent)]
    NotAnObject(#[from] NotAnObject),

    /// The user lacks the role the command needs.
    #[error("{role} is required for this command")]
    Forbidden {
        /// Missing role.
        role: &'static str,
    },

    /// The kind argument named no known entity kind.
    #[error(transparent)]
    UnknownKind(#[from] UnknownEntityKind),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

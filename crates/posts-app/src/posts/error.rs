//! Error types for post operations.

use resource_sync::SyncError;
use thiserror::Error;

/// Errors that can occur during post operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PostError {
    /// Posts need a non-blank title.
    #[error("Post title must not be empty")]
    EmptyTitle,

    /// The synchronization layer or the remote rejected the operation.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl PostError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PostError::Sync(e) if e.is_not_found())
    }
}

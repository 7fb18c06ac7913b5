//! # Sync Errors
//!
//! Two layers of errors: [`RemoteError`] is what a [`RemoteClient`](crate::RemoteClient)
//! reports, [`SyncError`] is what the [`ResourceStore`](crate::ResourceStore) surfaces to its
//! caller. A remote "not found" is lifted into [`SyncError::NotFound`] so callers match on a
//! single variant whether the miss happened locally or on the server.

use std::time::Duration;

/// Failures reported by a remote collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    /// The endpoint could not be reached or the exchange was interrupted.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("Remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote store does not recognize the identifier.
    #[error("Remote item not found: {0}")]
    NotFound(String),

    /// The call did not complete within the configured limit.
    #[error("Remote call timed out after {0:?}")]
    Timeout(Duration),

    /// The response did not match the documented shape.
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// Errors returned by `ResourceStore` operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Remote(RemoteError),
}

impl SyncError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound(_))
    }
}

impl From<RemoteError> for SyncError {
    fn from(e: RemoteError) -> Self {
        match e {
            RemoteError::NotFound(id) => SyncError::NotFound(id),
            other => SyncError::Remote(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_not_found_is_lifted() {
        let err = SyncError::from(RemoteError::NotFound("p1".into()));
        assert_eq!(err, SyncError::NotFound("p1".into()));
        assert!(err.is_not_found());
    }

    #[test]
    fn other_remote_errors_are_wrapped() {
        let err = SyncError::from(RemoteError::Status {
            status: 500,
            body: "boom".into(),
        });
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Remote returned status 500: boom");
    }
}

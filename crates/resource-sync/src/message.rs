//! # Remote Messages
//!
//! Message types used by [`ChannelRemote`](crate::ChannelRemote) to hand remote calls to
//! whoever holds the receiving end of the channel: a test, or a task bridging to a transport.

use crate::entity::SyncEntity;
use crate::error::RemoteError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel attached to each request.
pub type Response<T> = oneshot::Sender<Result<T, RemoteError>>;

/// One remote call, carrying its own reply channel.
///
/// The variants map one to one to the [`RemoteClient`](crate::RemoteClient) operations.
#[derive(Debug)]
pub enum RemoteRequest<T: SyncEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        draft: T::Draft,
        respond_to: Response<T::Id>,
    },
    Replace {
        id: T::Id,
        entity: T,
        respond_to: Response<()>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    GetOne {
        id: T::Id,
        respond_to: Response<T>,
    },
}

impl<T: SyncEntity> RemoteRequest<T> {
    /// Short operation name, used in logs and mock diagnostics.
    pub fn operation(&self) -> &'static str {
        match self {
            RemoteRequest::List { .. } => "list",
            RemoteRequest::Create { .. } => "create",
            RemoteRequest::Replace { .. } => "replace",
            RemoteRequest::Delete { .. } => "delete",
            RemoteRequest::GetOne { .. } => "get_one",
        }
    }
}

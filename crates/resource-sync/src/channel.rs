//! # Channel Remote
//!
//! A [`RemoteClient`] that forwards every call over a Tokio mpsc channel and waits for the
//! answer on a oneshot channel. The receiving side decides when and how each call completes,
//! which makes completion order fully controllable.

use crate::entity::SyncEntity;
use crate::error::RemoteError;
use crate::message::RemoteRequest;
use crate::remote::RemoteClient;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// Cloneable handle that turns `RemoteClient` calls into [`RemoteRequest`] messages.
pub struct ChannelRemote<T: SyncEntity> {
    sender: mpsc::Sender<RemoteRequest<T>>,
}

impl<T: SyncEntity> Clone for ChannelRemote<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: SyncEntity> ChannelRemote<T> {
    pub fn new(sender: mpsc::Sender<RemoteRequest<T>>) -> Self {
        Self { sender }
    }

    async fn send<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, RemoteError>>) -> RemoteRequest<T>,
    ) -> Result<R, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| RemoteError::Transport("remote channel closed".into()))?;
        response
            .await
            .map_err(|_| RemoteError::Transport("remote dropped response channel".into()))?
    }
}

#[async_trait]
impl<T: SyncEntity> RemoteClient<T> for ChannelRemote<T> {
    async fn list(&self) -> Result<Vec<T>, RemoteError> {
        self.send(|respond_to| RemoteRequest::List { respond_to })
            .await
    }

    async fn create(&self, draft: &T::Draft) -> Result<T::Id, RemoteError> {
        let draft = draft.clone();
        self.send(|respond_to| RemoteRequest::Create { draft, respond_to })
            .await
    }

    async fn replace(&self, id: &T::Id, entity: &T) -> Result<(), RemoteError> {
        let id = id.clone();
        let entity = entity.clone();
        self.send(|respond_to| RemoteRequest::Replace {
            id,
            entity,
            respond_to,
        })
        .await
    }

    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError> {
        let id = id.clone();
        self.send(|respond_to| RemoteRequest::Delete { id, respond_to })
            .await
    }

    async fn get_one(&self, id: &T::Id) -> Result<T, RemoteError> {
        let id = id.clone();
        self.send(|respond_to| RemoteRequest::GetOne { id, respond_to })
            .await
    }
}

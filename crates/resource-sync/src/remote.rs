//! # RemoteClient Trait
//!
//! The seam between the store and whatever actually talks to the backend. Each operation
//! either resolves with a well-formed payload or fails; the store treats every failure the
//! same way and never infers partial success from a response.

use crate::entity::SyncEntity;
use crate::error::RemoteError;
use async_trait::async_trait;

/// Asynchronous CRUD exchanges with the remote collection. Implementations own no state
/// about the collection.
#[async_trait]
pub trait RemoteClient<T: SyncEntity>: Send + Sync {
    /// Fetch the full collection, in server order.
    async fn list(&self) -> Result<Vec<T>, RemoteError>;

    /// Persist a new entity and return the identifier the server assigned.
    async fn create(&self, draft: &T::Draft) -> Result<T::Id, RemoteError>;

    /// Overwrite the entity stored under `id`.
    async fn replace(&self, id: &T::Id, entity: &T) -> Result<(), RemoteError>;

    /// Remove the entity stored under `id`.
    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError>;

    /// Fetch a single entity, bypassing any local mirror.
    async fn get_one(&self, id: &T::Id) -> Result<T, RemoteError>;
}

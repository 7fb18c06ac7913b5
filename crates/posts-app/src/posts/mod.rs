//! # Posts
//!
//! Post-specific wiring of the generic resource store.
//!
//! ## Structure
//!
//! - [`entity`] - [`SyncEntity`](resource_sync::SyncEntity) implementation for [`Post`]
//! - [`error`] - [`PostError`] type for post operations
//! - [`new()`] - Factory function that builds the store and wraps it in a [`PostsService`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::PostsService;
use crate::model::Post;
use resource_sync::{RemoteClient, ResourceStore, StoreConfig};

/// Creates a posts store backed by `remote` and returns its service facade.
pub fn new<C: RemoteClient<Post>>(remote: C, config: StoreConfig) -> PostsService<C> {
    PostsService::new(ResourceStore::new(remote, config))
}

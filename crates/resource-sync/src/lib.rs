//! # Resource Sync
//!
//! Building blocks for keeping a client-side mirror of a remote CRUD collection in step with
//! the server, and for telling interested parts of the program when it changes.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`SyncEntity`]) - what a mirrored resource looks like: its id, the
//!    payload that creates it, the payload that modifies it.
//! 2. **Store Layer** ([`ResourceStore`]) - the only owner of the mirror. Every mutation is
//!    sent to the remote first and committed locally only when the remote agrees.
//! 3. **Transport Layer** ([`RemoteClient`]) - the async exchanges with the backend. The
//!    store receives one at construction; nothing is global.
//!
//! Observers attach through the store's [`ChangeNotifier`] and receive an immutable
//! [`Snapshot`] after every successful mutation.
//!
//! ## Example
//!
//! ```rust
//! use resource_sync::mock::MockRemote;
//! use resource_sync::{ResourceStore, StoreConfig, SyncEntity};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Todo { id: Option<u32>, text: String }
//!
//! impl SyncEntity for Todo {
//!     type Id = u32;
//!     type Draft = String;
//!     type Changes = String;
//!
//!     fn id(&self) -> Option<&u32> { self.id.as_ref() }
//!     fn from_draft(text: String) -> Self { Self { id: None, text } }
//!     fn assign_id(&mut self, id: u32) { self.id = Some(id); }
//!     fn apply(&mut self, text: String) { self.text = text; }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut remote = MockRemote::<Todo>::new();
//!     remote.expect_create().return_ok(7);
//!
//!     let store = ResourceStore::new(remote.client(), StoreConfig::default());
//!     let _sub = store.subscribe(|snapshot| {
//!         println!("{} todo(s)", snapshot.len());
//!         Ok(())
//!     });
//!
//!     let todo = store.add("write docs".into()).await.unwrap();
//!     assert_eq!(store.get(&7).unwrap(), todo);
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted remote and for helpers that let a test answer
//! each request by hand.

pub mod channel;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod notifier;
pub mod remote;
pub mod store;

// Re-export core types for convenience
pub use channel::ChannelRemote;
pub use entity::SyncEntity;
pub use error::{RemoteError, SyncError};
pub use message::{RemoteRequest, Response};
pub use notifier::{ChangeNotifier, HandlerResult, Snapshot, Subscription};
pub use remote::RemoteClient;
pub use store::{ResourceStore, StoreConfig};

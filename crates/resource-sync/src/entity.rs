//! # SyncEntity Trait
//!
//! The `SyncEntity` trait is the contract a resource type must satisfy to be mirrored by a
//! [`ResourceStore`](crate::ResourceStore). It names the identifier type, the payload used to
//! create a new instance (the *draft*), and the payload used to modify an existing one.
//!
//! # Identity
//! An entity's identifier is optional. A value built from a draft has no identifier until the
//! remote store assigns one; after [`SyncEntity::assign_id`] it is present for the rest of the
//! entity's life. The store never targets an entity without an identifier.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource must implement to be mirrored by a `ResourceStore`.
///
/// We use associated types so that a `Post` store only accepts post drafts and post
/// changes. The compiler rejects a payload meant for another resource.
pub trait SyncEntity: Clone + Debug + Send + Sync + 'static {
    /// The server-assigned identifier (e.g., a document id string).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// The data required to create a new instance.
    type Draft: Clone + Send + Sync + Debug + 'static;

    /// The data that replaces the mutable fields of an existing instance.
    type Changes: Clone + Send + Sync + Debug + 'static;

    /// Returns the identifier, or `None` for a draft not yet acknowledged by the remote.
    fn id(&self) -> Option<&Self::Id>;

    /// Builds a local entity from a draft. The result has no identifier.
    fn from_draft(draft: Self::Draft) -> Self;

    /// Records the identifier assigned by the remote store.
    ///
    /// Called exactly once per entity, on a value produced by [`SyncEntity::from_draft`].
    fn assign_id(&mut self, id: Self::Id);

    /// Replaces the mutable fields in place. The identifier is untouched.
    fn apply(&mut self, changes: Self::Changes);
}

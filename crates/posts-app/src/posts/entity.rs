//! SyncEntity trait implementation for the [`Post`] model.
//!
//! This module contains the [`SyncEntity`] trait implementation that enables [`Post`] to be
//! mirrored by the generic [`resource_sync::ResourceStore`].

use crate::model::{Post, PostChanges, PostDraft};
use resource_sync::SyncEntity;

impl SyncEntity for Post {
    type Id = String;
    type Draft = PostDraft;
    type Changes = PostChanges;

    fn id(&self) -> Option<&String> {
        self.id.as_ref()
    }

    /// Creates an unsaved Post from the draft.
    fn from_draft(draft: PostDraft) -> Self {
        Self {
            id: None,
            title: draft.title,
            content: draft.content,
        }
    }

    fn assign_id(&mut self, id: String) {
        debug_assert!(self.id.is_none(), "post identifier assigned twice");
        self.id = Some(id);
    }

    /// Handles updates to the Post entity.
    ///
    /// # Fields Updated
    /// - `title`: replaced
    /// - `content`: replaced
    fn apply(&mut self, changes: PostChanges) {
        self.title = changes.title;
        self.content = changes.content;
    }
}

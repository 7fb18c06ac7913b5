use serde::Serialize;

/// A post as the client knows it.
///
/// # Resource Sync
/// This struct implements the [`SyncEntity`](resource_sync::SyncEntity) trait, allowing it
/// to be mirrored by a [`ResourceStore`](resource_sync::ResourceStore).
///
/// `id` is `None` only for a post built locally and not yet acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
}

/// Payload for creating a new post. Serialized as-is for `POST {collection}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

/// Replacement title and content for an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

impl Post {
    /// Creates a persisted post.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the server
    /// * `title` - Post title
    /// * `content` - Post body, may be empty
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            content: content.into(),
        }
    }
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

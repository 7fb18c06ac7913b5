use crate::model::{Post, PostChanges, PostDraft};
use crate::posts::PostError;
use resource_sync::{HandlerResult, RemoteClient, ResourceStore, Snapshot, Subscription};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Post-specific facade over a [`ResourceStore<Post, C>`](ResourceStore).
///
/// Cloning is cheap; every clone shares the same mirror and subscriber list.
pub struct PostsService<C> {
    store: Arc<ResourceStore<Post, C>>,
}

impl<C> Clone for PostsService<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<C: RemoteClient<Post>> PostsService<C> {
    pub fn new(store: ResourceStore<Post, C>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &ResourceStore<Post, C> {
        &self.store
    }

    /// Current posts in server order.
    pub fn posts(&self) -> Snapshot<Post> {
        self.store.snapshot()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Snapshot<Post>) -> HandlerResult + Send + Sync + 'static,
    {
        self.store.subscribe(handler)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.store.unsubscribe(subscription)
    }

    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Snapshot<Post>, PostError> {
        let posts = self.store.refresh().await?;
        info!(size = posts.len(), "Posts loaded");
        Ok(posts)
    }

    /// Creates a post on the server and appends it once the server has assigned its id.
    #[instrument(skip(self))]
    pub async fn add(&self, title: &str, content: &str) -> Result<Post, PostError> {
        ensure_title(title)?;
        let post = self.store.add(PostDraft::new(title, content)).await?;
        debug!(?post, "Post added");
        Ok(post)
    }

    /// Replaces title and content of an existing post.
    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, title: &str, content: &str) -> Result<Post, PostError> {
        ensure_title(title)?;
        let changes = PostChanges {
            title: title.to_string(),
            content: content.to_string(),
        };
        Ok(self.store.update(&id.to_string(), changes).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), PostError> {
        Ok(self.store.delete(&id.to_string()).await?)
    }

    /// Looks the post up in the local mirror.
    pub fn get(&self, id: &str) -> Result<Post, PostError> {
        Ok(self.store.get(&id.to_string())?)
    }

    /// Reads a single post straight from the server. The mirror is left as is.
    #[instrument(skip(self))]
    pub async fn fetch(&self, id: &str) -> Result<Post, PostError> {
        Ok(self.store.fetch(&id.to_string()).await?)
    }
}

fn ensure_title(title: &str) -> Result<(), PostError> {
    if title.trim().is_empty() {
        return Err(PostError::EmptyTitle);
    }
    Ok(())
}

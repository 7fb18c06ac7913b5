use crate::clients::{HttpPostRemote, PostsService};
use crate::config::{AppConfig, ConfigError};
use tracing::info;

/// Composition root: builds the HTTP remote, the store, and the service facade from an
/// [`AppConfig`].
///
/// # Example
///
/// ```ignore
/// let system = PostsSystem::new(&AppConfig::default())?;
/// let posts = system.posts.refresh().await?;
/// ```
pub struct PostsSystem {
    /// Facade over the mirrored posts collection
    pub posts: PostsService<HttpPostRemote>,
}

impl PostsSystem {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let url = config.api_url()?;
        let store_config = config.store_config();
        info!(%url, timeout = ?store_config.request_timeout, "Starting posts system");

        let remote = HttpPostRemote::new(url);
        Ok(Self {
            posts: crate::posts::new(remote, store_config),
        })
    }
}

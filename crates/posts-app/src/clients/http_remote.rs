//! # HTTP Remote
//!
//! [`RemoteClient<Post>`](RemoteClient) over the JSON posts API.
//!
//! | Operation | Request                     | Success payload                    |
//! |-----------|-----------------------------|------------------------------------|
//! | list      | `GET {collection}`          | `{ message, posts: [...] }`        |
//! | create    | `POST {collection}`         | `{ message, insertedId }`          |
//! | replace   | `PUT {collection}/{id}`     | ignored                            |
//! | delete    | `DELETE {collection}/{id}`  | ignored                            |
//! | get_one   | `GET {collection}/{id}`     | a post, or `{ message, post }`     |
//!
//! Posts travel with the identifier under `_id`. A `404` on an item URL is reported as
//! [`RemoteError::NotFound`]. Any other non-2xx status, including a `404` on the collection
//! URL, is a [`RemoteError::Status`].

use crate::model::{Post, PostDraft};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use resource_sync::{RemoteClient, RemoteError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Talks to a posts collection rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpPostRemote {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct WirePost {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    #[serde(default)]
    content: String,
}

impl From<WirePost> for Post {
    fn from(wire: WirePost) -> Self {
        Post::new(wire.id, wire.title, wire.content)
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    message: Option<String>,
    #[serde(alias = "items")]
    posts: Vec<WirePost>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    message: Option<String>,
    #[serde(alias = "postId")]
    inserted_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GetOneResponse {
    Wrapped { post: WirePost },
    Bare(WirePost),
}

#[derive(Debug, Serialize)]
struct ReplaceBody<'a> {
    id: &'a str,
    title: &'a str,
    content: &'a str,
}

impl HttpPostRemote {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn item_url(&self, id: &str) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::Transport(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Sends `request`. `item` is the post an item URL points at. A `404` means the post is
    /// gone only when `item` is set.
    async fn send(
        &self,
        request: RequestBuilder,
        item: Option<&str>,
    ) -> Result<Response, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = item {
                return Err(RemoteError::NotFound(id.to_string()));
            }
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, RemoteError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| RemoteError::Malformed(e.to_string()))
}

#[async_trait]
impl RemoteClient<Post> for HttpPostRemote {
    async fn list(&self) -> Result<Vec<Post>, RemoteError> {
        let response = self
            .send(self.client.get(self.base_url.clone()), None)
            .await?;
        let body: ListResponse = decode(response).await?;
        debug!(server_message = body.message.as_deref(), size = body.posts.len(), "List");
        Ok(body.posts.into_iter().map(Post::from).collect())
    }

    async fn create(&self, draft: &PostDraft) -> Result<String, RemoteError> {
        let request = self.client.post(self.base_url.clone()).json(draft);
        let response = self.send(request, None).await?;
        let body: CreateResponse = decode(response).await?;
        debug!(server_message = body.message.as_deref(), id = %body.inserted_id, "Create");
        Ok(body.inserted_id)
    }

    async fn replace(&self, id: &String, post: &Post) -> Result<(), RemoteError> {
        let body = ReplaceBody {
            id: id.as_str(),
            title: &post.title,
            content: &post.content,
        };
        let request = self.client.put(self.item_url(id)?).json(&body);
        self.send(request, Some(id.as_str())).await?;
        Ok(())
    }

    async fn delete(&self, id: &String) -> Result<(), RemoteError> {
        let request = self.client.delete(self.item_url(id)?);
        self.send(request, Some(id.as_str())).await?;
        Ok(())
    }

    async fn get_one(&self, id: &String) -> Result<Post, RemoteError> {
        let response = self
            .send(self.client.get(self.item_url(id)?), Some(id.as_str()))
            .await?;
        let post = match decode::<GetOneResponse>(response).await? {
            GetOneResponse::Wrapped { post } | GetOneResponse::Bare(post) => post,
        };
        Ok(post.into())
    }
}

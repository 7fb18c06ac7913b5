//! In-process posts backend for HTTP tests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredPost {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Default)]
struct Inner {
    posts: Vec<StoredPost>,
    next_id: u32,
    fail_next: Option<StatusCode>,
}

#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Deserialize)]
struct NewPost {
    title: String,
    content: String,
}

#[derive(Deserialize)]
struct ReplacePost {
    id: String,
    title: String,
    content: String,
}

type Reply = Result<(StatusCode, Json<Value>), StatusCode>;

impl Backend {
    /// Makes the next request fail with `status`.
    pub fn fail_next(&self, status: StatusCode) {
        self.inner.lock().fail_next = Some(status);
    }

    pub fn posts(&self) -> Vec<StoredPost> {
        self.inner.lock().posts.clone()
    }

    pub fn seed(&self, title: &str, content: &str) -> String {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = format!("p{}", inner.next_id);
        inner.posts.push(StoredPost {
            id: id.clone(),
            title: title.into(),
            content: content.into(),
        });
        id
    }

    fn injected_failure(&self) -> Result<(), StatusCode> {
        match self.inner.lock().fail_next.take() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }
}

fn wire(post: &StoredPost) -> Value {
    json!({"_id": post.id, "title": post.title, "content": post.content})
}

async fn list(State(backend): State<Backend>) -> Reply {
    backend.injected_failure()?;
    let posts: Vec<Value> = backend.inner.lock().posts.iter().map(wire).collect();
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Posts fetched successfully!", "posts": posts})),
    ))
}

async fn create(State(backend): State<Backend>, Json(new): Json<NewPost>) -> Reply {
    backend.injected_failure()?;
    let id = backend.seed(&new.title, &new.content);
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Post added successfully", "insertedId": id})),
    ))
}

async fn get_one(State(backend): State<Backend>, Path(id): Path<String>) -> Reply {
    backend.injected_failure()?;
    let inner = backend.inner.lock();
    let post = inner
        .posts
        .iter()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok((StatusCode::OK, Json(wire(post))))
}

async fn replace(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Json(body): Json<ReplacePost>,
) -> Reply {
    backend.injected_failure()?;
    if body.id != id {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut inner = backend.inner.lock();
    let post = inner
        .posts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    post.title = body.title;
    post.content = body.content;
    Ok((StatusCode::OK, Json(json!({"message": "Update successful!"}))))
}

async fn delete(State(backend): State<Backend>, Path(id): Path<String>) -> Reply {
    backend.injected_failure()?;
    let mut inner = backend.inner.lock();
    let before = inner.posts.len();
    inner.posts.retain(|p| p.id != id);
    if inner.posts.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok((StatusCode::OK, Json(json!({"message": "Post deleted!"}))))
}

/// Serves the backend on an ephemeral port and returns the collection URL.
pub async fn spawn_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/posts", get(list).post(create))
        .route("/api/posts/:id", get(get_one).put(replace).delete(delete))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/posts")
}

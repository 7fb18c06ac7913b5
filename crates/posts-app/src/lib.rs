//! # Posts App
//!
//! A client for a remote posts API that keeps a local, observable mirror of the collection.
//!
//! ## 🗺️ Module Tour
//!
//! - **[`model`]**: [`Post`](model::Post) and its create/update payloads.
//! - **[`posts`]**: the [`SyncEntity`](resource_sync::SyncEntity) implementation and
//!   [`PostError`](posts::PostError).
//! - **[`clients`]**: [`HttpPostRemote`](clients::HttpPostRemote), the JSON transport, and
//!   [`PostsService`](clients::PostsService), the facade the rest of the program uses.
//! - **[`config`]**: [`AppConfig`](config::AppConfig), flags and environment.
//! - **[`lifecycle`]**: [`PostsSystem`](lifecycle::PostsSystem) wiring and tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! POSTS_API_URL=http://localhost:3000/api/posts RUST_LOG=info cargo run -p posts-app -- list
//! ```
//!
//! ## 🧪 Testing
//!
//! Unit tests drive [`PostsService`](clients::PostsService) through
//! [`resource_sync::mock::MockRemote`]. The integration tests run the HTTP transport against
//! an in-process `axum` backend.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod posts;

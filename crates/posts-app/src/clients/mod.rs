//! Domain-facing wrappers over the post store and its transport.

pub mod http_remote;
pub mod posts_client;

pub use http_remote::*;
pub use posts_client::*;

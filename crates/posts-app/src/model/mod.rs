//! Pure data structures mirrored by the [`ResourceStore`](resource_sync::ResourceStore).

pub mod post;

pub use post::*;

//! Wiring of the posts system and process-wide setup.

pub mod posts_system;
pub mod tracing;

pub use posts_system::*;

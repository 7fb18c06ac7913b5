//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered by
//! `RUST_LOG`. Nothing is printed unless a level is asked for.
//!
//! ```bash
//! # Store commits and subscriber faults
//! RUST_LOG=info posts list
//!
//! # Request payloads and server messages
//! RUST_LOG=debug posts add "Hello" "First post"
//!
//! # Subscribe/publish bookkeeping
//! RUST_LOG=resource_sync=trace posts list
//! ```
//!
//! Store logs carry `entity_type` instead of a module path, so the target is hidden.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! - **Structured logging** with the `tracing` crate
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Compact format** that hides module paths (`with_target(false)`); the store actor tags its
//!   lines with `entity_type` instead
//!
//! ```bash
//! RUST_LOG=info cargo run      # Lifecycle lines only (started, shutdown, counts)
//! RUST_LOG=debug cargo run     # Every merge with received/inserted/size
//! ```
//!
//! With `RUST_LOG=debug` a run looks like:
//!
//! ```text
//! INFO Actor started entity_type="Actor"
//! DEBUG Merge entity_type="Actor" received=24 inserted=24 size=24
//! DEBUG Merge entity_type="Actor" received=31 inserted=29 size=53
//! DEBUG Snapshot entity_type="Actor" size=53
//! INFO Shutdown entity_type="Actor" size=53
//! ```

/// Initializes the tracing subscriber. Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

//! Tracing subscriber setup.
//!
//! The level comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info order-desk demo     # one line per stored record
//! RUST_LOG=debug order-desk demo    # every request sent to an actor
//! ```
//!
//! Actor logs carry an `entity_type` field, so module paths are left out of the output.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

//! # System Lifecycle
//!
//! Starting, wiring and stopping the record actors.
//!
//! Actors are created without dependencies and receive them when started, through
//! `run(context)`. The customer actor is started with a [`ProductClient`](crate::clients::ProductClient)
//! so that deleting a customer can cascade to its products. The dependency graph is acyclic, so
//! dropping every client is enough to stop the whole system.
//!
//! Logging is set up separately, once per process, with [`setup_tracing`].

pub mod store_system;
pub mod telemetry;

pub use store_system::*;
pub use telemetry::*;

//! # Resource Store
//!
//! Typed, actor-backed record stores. Each record type gets one Tokio task that owns its records
//! in memory and serves a small persistence contract over message passing:
//!
//! - **create** one record, returning its freshly minted id
//! - **get** a record by id
//! - **list** records passing a filter, optionally ordered by a column
//! - **update** a record by id, returning the new state
//! - **delete** a record by id
//!
//! Because a single task owns the map, requests against one store are applied strictly one after
//! another and need no locks. Independent stores run in parallel.
//!
//! ## Layers
//!
//! 1. **Record** ([`ActorEntity`]) - fields, payload types, filter and sort semantics, hooks
//! 2. **Runtime** ([`ResourceActor`]) - the task that owns the records
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - the cloneable handle callers hold
//!
//! ## Context Injection
//!
//! Hooks receive a context value passed to [`ResourceActor::run`], not to the constructor. A
//! record that must reach another store (a customer removing its products on delete) gets that
//! store's client as its context:
//!
//! ```rust,ignore
//! let (product_actor, product_client) = ResourceActor::<Product>::new(32, Uuid::new_v4);
//! let (customer_actor, customer_client) = ResourceActor::<Customer>::new(32, Uuid::new_v4);
//!
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(customer_actor.run(ProductClient::new(product_client.clone())));
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted responses, which makes
//! store failures trivial to inject. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use query::{nulls_last, Direction, Query};

//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored record (Customer, Product, …) implements
//! so that a generic [`ResourceActor`](crate::ResourceActor) can own it. It names the id type,
//! the create/update payloads, the filter and sortable columns used by list queries, the injected
//! context, and the record's error type.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`. Override them when a record needs validation on insert or has to
//! clean up dependents before removal (a customer deleting its products, for example).

use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other actors. The `Context` associated type is
/// handed to every hook; it is supplied to [`ResourceActor::run`](crate::ResourceActor::run)
/// rather than to the constructor, so clients of other actors can be wired in late.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload for inserting a new record.
    type Create: Send + Sync + Debug;

    /// Payload for a partial update.
    type Update: Send + Sync + Debug;

    /// Predicate payload accepted by list queries (e.g. "products of customer X").
    type Filter: Send + Sync + Debug;

    /// Columns a list query may be ordered by.
    type Column: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this record.
    ///
    /// One error enum per record type rather than one per operation: clients match on a single
    /// type, at the cost of some operations technically being able to return variants they never
    /// produce.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the freshly minted id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this record passes the given filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Compare two records on a sortable column (ascending).
    fn compare(&self, other: &Self, column: &Self::Column) -> Ordering;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a partial update to the stored record.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed. An error aborts the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

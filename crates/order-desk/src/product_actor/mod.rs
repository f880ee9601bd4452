//! # Product Actor
//!
//! The store for every customer's favorite products.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for
//!   [`Product`](crate::model::Product)
//! - [`error`] - [`ProductError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_desk::clients::ProductClient;
//! use order_desk::model::ProductCreate;
//! use order_desk::product_actor;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!
//!     // No dependencies
//!     tokio::spawn(actor.run(()));
//!
//!     let customer_id = Uuid::new_v4();
//!     client
//!         .create_product(ProductCreate::new(customer_id, "赤霧島", "900ml"))
//!         .await?;
//!
//!     // An unordered product keeps new ones unordered as well
//!     assert_eq!(client.next_display_order(customer_id).await?, None);
//!
//!     let other = Uuid::new_v4();
//!     assert_eq!(client.next_display_order(other).await?, Some(0));
//!     client
//!         .create_product(ProductCreate::new(other, "竹鶴", "").at_position(4))
//!         .await?;
//!     assert_eq!(client.next_display_order(other).await?, Some(5));
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Product;
use resource_store::{ResourceActor, ResourceClient};
use uuid::Uuid;

/// Creates a new Product actor and its client. Ids are random UUIDs.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size, Uuid::new_v4)
}

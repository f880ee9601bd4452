//! # Customer Actor
//!
//! Owns the customer records. Depends on the product store: the actor must be started with a
//! [`ProductClient`](crate::clients::ProductClient) as its context, which the delete hook uses
//! to cascade.
//!
//! ```rust,ignore
//! let (customer_actor, customer_client) = customer_actor::new(32);
//! tokio::spawn(customer_actor.run(product_client.clone()));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Customer;
use resource_store::{ResourceActor, ResourceClient};
use uuid::Uuid;

/// Creates a new Customer actor and its client. Ids are random UUIDs.
pub fn new(buffer_size: usize) -> (ResourceActor<Customer>, ResourceClient<Customer>) {
    ResourceActor::new(buffer_size, Uuid::new_v4)
}

//! Type-safe wrappers around [`ResourceClient`](resource_store::ResourceClient).

pub mod customer_client;
pub mod product_client;

pub use customer_client::*;
pub use product_client::*;

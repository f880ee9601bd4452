//! Plain data types shared by the actors, the order form and the admin console.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;

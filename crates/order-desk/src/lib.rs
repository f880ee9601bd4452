//! # Order Desk
//!
//! Favorite-product ordering for a liquor wholesaler's customers.
//!
//! - **[model]**: customers, products and orders.
//! - **[customer_actor]** / **[product_actor]**: the record stores, built on
//!   [`resource_store::ResourceActor`].
//! - **[clients]**: typed clients for the stores.
//! - **[catalog]**: the supplier catalog parser and the per-customer import.
//! - **[order]**: the customer's order form, the order text and the ways to share it.
//! - **[reorder]**: drag-and-drop reordering of a customer's products.
//! - **[admin]**: the shop owner's console, behind **[auth]**.
//! - **[delivery]**, **[speech]**: delivery days and voice input for the order form.
//! - **[lifecycle]**: starting and stopping the stores, logging setup.
//!
//! Configuration is read once by [`config::AppConfig::from_env`] and passed down.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod delivery;
pub mod lifecycle;
pub mod model;
pub mod notice;
pub mod order;
pub mod product_actor;
pub mod reorder;
pub mod speech;

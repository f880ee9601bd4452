//! Supplier catalog handling: the line parser and the per-customer import built on it.

pub mod import;
pub mod parser;

pub use import::*;
pub use parser::*;

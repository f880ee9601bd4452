//! The customer-facing order flow: fill in the form, render it as text, share it.

pub mod form;
pub mod formatter;
pub mod share;

pub use form::*;
pub use formatter::*;
pub use share::*;

//! Error types for the Customer actor.

use thiserror::Error;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// No customer has the requested id.
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// The id could not even be parsed, e.g. a mangled order link.
    #[error("Malformed customer id: {0}")]
    MalformedId(String),

    #[error("Customer name must not be blank")]
    BlankName,

    /// Removing the customer's products failed; the customer is kept.
    #[error("Failed to delete products of customer: {0}")]
    CascadeFailed(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CustomerError {
    fn from(msg: String) -> Self {
        CustomerError::ActorCommunicationError(msg)
    }
}

use crate::model::product::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CustomerId = Uuid;

/// A shop customer. Products reference the customer through `customer_id`.
///
/// Deleting a customer deletes its products as well, see
/// [`impl ActorEntity for Customer`](#impl-ActorEntity-for-Customer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
}

impl CustomerCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CustomerFilter {
    /// Exact match on the trimmed name.
    Name(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomerColumn {
    CreatedAt,
    Name,
}

/// The nested read: a customer together with its products in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerWithProducts {
    #[serde(flatten)]
    pub customer: Customer,
    pub products: Vec<Product>,
}

//! [`ActorEntity`] implementation for [`Customer`].
//!
//! The customer actor runs with a [`ProductClient`] as its context so that deleting a customer
//! can remove the customer's products first.

use super::CustomerError;
use crate::clients::ProductClient;
use crate::model::{
    Customer, CustomerColumn, CustomerCreate, CustomerFilter, CustomerId, CustomerUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::ActorEntity;
use std::cmp::Ordering;
use tracing::info;

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Filter = CustomerFilter;
    type Column = CustomerColumn;
    type Context = ProductClient;
    type Error = CustomerError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(CustomerError::BlankName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &CustomerFilter) -> bool {
        match filter {
            CustomerFilter::Name(name) => self.name == name.trim(),
        }
    }

    fn compare(&self, other: &Self, column: &CustomerColumn) -> Ordering {
        match column {
            CustomerColumn::CreatedAt => self.created_at.cmp(&other.created_at),
            CustomerColumn::Name => self.name.cmp(&other.name),
        }
    }

    async fn on_update(
        &mut self,
        update: CustomerUpdate,
        _products: &ProductClient,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(CustomerError::BlankName);
            }
            self.name = name.to_string();
        }
        Ok(())
    }

    /// Deletes every product of this customer. Any failure aborts the customer delete.
    async fn on_delete(&self, products: &ProductClient) -> Result<(), Self::Error> {
        let removed = products
            .delete_for_customer(self.id)
            .await
            .map_err(|e| CustomerError::CascadeFailed(e.to_string()))?;
        info!(customer_id = %self.id, removed, "Cascade delete");
        Ok(())
    }
}

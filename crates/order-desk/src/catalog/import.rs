//! # Catalog Import
//!
//! Replaces a customer's favorites with the products parsed from a supplier catalog. The
//! customer is looked up by name and created when missing; an existing customer loses its old
//! products first so that re-running an import never duplicates them.

use crate::catalog::parser::{parse_catalog, ParserConfig};
use crate::clients::{CustomerClient, ProductClient};
use crate::customer_actor::CustomerError;
use crate::model::{CustomerCreate, CustomerId, ProductCreate};
use crate::product_actor::ProductError;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error, PartialEq)]
pub enum ImportError {
    #[error("Customer name must not be blank")]
    BlankCustomerName,

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Product(#[from] ProductError),
}

/// What an import did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub customer_id: CustomerId,
    /// The customer did not exist before.
    pub created: bool,
    /// Products removed from an existing customer.
    pub removed: usize,
    pub inserted: usize,
}

#[derive(Clone)]
pub struct CatalogImporter {
    customers: CustomerClient,
    products: ProductClient,
}

impl CatalogImporter {
    pub fn new(customers: CustomerClient, products: ProductClient) -> Self {
        Self {
            customers,
            products,
        }
    }

    /// Parses `raw_text` and stores every line as a product of `customer_name`, in line order.
    #[instrument(skip(self, raw_text, config), fields(bytes = raw_text.len()))]
    pub async fn import_catalog(
        &self,
        customer_name: &str,
        raw_text: &str,
        config: &ParserConfig,
    ) -> Result<ImportReport, ImportError> {
        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            return Err(ImportError::BlankCustomerName);
        }

        let (customer_id, created, removed) =
            match self.customers.find_by_name(customer_name).await? {
                Some(existing) => {
                    let removed = self.products.delete_for_customer(existing.id).await?;
                    info!(customer_id = %existing.id, removed, "Existing customer, products cleared");
                    (existing.id, false, removed)
                }
                None => {
                    let id = self
                        .customers
                        .create_customer(CustomerCreate::new(customer_name))
                        .await?;
                    info!(customer_id = %id, "Customer created");
                    (id, true, 0)
                }
            };

        let batch: Vec<ProductCreate> = parse_catalog(raw_text, config)
            .into_iter()
            .zip(0_i64..)
            .map(|(line, position)| {
                ProductCreate::new(customer_id, line.name, &line.volume).at_position(position)
            })
            .collect();

        let inserted = self.products.create_many(batch).await?.len();
        info!(customer_id = %customer_id, inserted, "Catalog imported");

        Ok(ImportReport {
            customer_id,
            created,
            removed,
            inserted,
        })
    }
}

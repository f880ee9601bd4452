//! # Customer Client
//!
//! High-level API over a `ResourceClient<Customer>`. Nested reads (a customer together with its
//! products) go through the product client it is constructed with.
use crate::clients::ProductClient;
use crate::customer_actor::CustomerError;
use crate::model::{
    Customer, CustomerColumn, CustomerCreate, CustomerFilter, CustomerId, CustomerWithProducts,
};
use async_trait::async_trait;
use futures::future::try_join_all;
use resource_store::{ActorClient, Direction, FrameworkError, Query, ResourceClient};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
    products: ProductClient,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>, products: ProductClient) -> Self {
        Self { inner, products }
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CustomerError::NotFound(id),
            other => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CustomerClient {
    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        params: CustomerCreate,
    ) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The oldest customer with exactly this (trimmed) name.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, CustomerError> {
        debug!("Sending request");
        let query = Query::filtered(CustomerFilter::Name(name.trim().to_string()))
            .order_by(CustomerColumn::CreatedAt, Direction::Ascending);
        let found = self.inner.list(query).await.map_err(Self::map_error)?;
        Ok(found.into_iter().next())
    }

    /// Every customer, newest first, each with its products in display order.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<CustomerWithProducts>, CustomerError> {
        debug!("Sending request");
        let customers = self
            .inner
            .list(Query::all().order_by(CustomerColumn::CreatedAt, Direction::Descending))
            .await
            .map_err(Self::map_error)?;

        try_join_all(customers.into_iter().map(|customer| self.with_products(customer))).await
    }

    /// Single nested read by the raw id taken from an order link.
    ///
    /// A string that is not a UUID yields [`CustomerError::MalformedId`]; a well-formed id with
    /// no record yields [`CustomerError::NotFound`].
    #[instrument(skip(self))]
    pub async fn fetch_customer(&self, raw_id: &str) -> Result<CustomerWithProducts, CustomerError> {
        let id = Uuid::parse_str(raw_id.trim())
            .map_err(|_| CustomerError::MalformedId(raw_id.to_string()))?;
        let customer = self
            .inner
            .get(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| CustomerError::NotFound(id.to_string()))?;
        self.with_products(customer).await
    }

    async fn with_products(
        &self,
        customer: Customer,
    ) -> Result<CustomerWithProducts, CustomerError> {
        let products = self
            .products
            .list_for_customer(customer.id)
            .await
            .map_err(|e| CustomerError::ActorCommunicationError(e.to_string()))?;
        Ok(CustomerWithProducts { customer, products })
    }
}

//! # Product Client
//!
//! High-level API over a `ResourceClient<Product>`.
use crate::model::{
    CustomerId, Product, ProductColumn, ProductCreate, ProductFilter, ProductId, ProductUpdate,
};
use crate::product_actor::ProductError;
use resource_store::{ActorClient, Direction, FrameworkError, Query, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Inserts a batch in the given order. Stops at the first failure; records created before
    /// it stay in place.
    #[instrument(skip(self, batch), fields(count = batch.len()))]
    pub async fn create_many(
        &self,
        batch: Vec<ProductCreate>,
    ) -> Result<Vec<ProductId>, ProductError> {
        let mut ids = Vec::with_capacity(batch.len());
        for params in batch {
            ids.push(self.inner.create(params).await.map_err(Self::map_error)?);
        }
        debug!(inserted = ids.len(), "Batch stored");
        Ok(ids)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_display_order(
        &self,
        id: ProductId,
        display_order: i64,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        let update = ProductUpdate {
            display_order: Some(display_order),
            ..Default::default()
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// A customer's products in display order.
    #[instrument(skip(self))]
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let query = Query::filtered(ProductFilter::Customer(customer_id))
            .order_by(ProductColumn::DisplayOrder, Direction::Ascending);
        self.inner.list(query).await.map_err(Self::map_error)
    }

    /// `display_order` for a product appended to the end of the customer's list: one past the
    /// current maximum, or 0 for an empty list.
    ///
    /// `None` when some product has no display order yet. Those sort after every number, so the
    /// new product stays unordered too and its `created_at` puts it last.
    #[instrument(skip(self))]
    pub async fn next_display_order(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<i64>, ProductError> {
        let products = self.list_for_customer(customer_id).await?;
        let positions: Option<Vec<i64>> = products.iter().map(|p| p.display_order).collect();
        Ok(positions.map(|positions| positions.into_iter().max().map_or(0, |max| max + 1)))
    }

    /// Removes every product of a customer, returning how many were removed.
    #[instrument(skip(self))]
    pub async fn delete_for_customer(&self, customer_id: CustomerId) -> Result<usize, ProductError> {
        let products = self
            .inner
            .list(Query::filtered(ProductFilter::Customer(customer_id)))
            .await
            .map_err(Self::map_error)?;
        for product in &products {
            self.inner
                .delete(product.id)
                .await
                .map_err(Self::map_error)?;
        }
        debug!(removed = products.len(), "Products removed");
        Ok(products.len())
    }
}

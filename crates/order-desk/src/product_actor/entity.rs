//! [`ActorEntity`] implementation for [`Product`].

use super::ProductError;
use crate::model::{
    normalize_volume, Product, ProductColumn, ProductCreate, ProductFilter, ProductId,
    ProductUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::ActorEntity;
use std::cmp::Ordering;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Filter = ProductFilter;
    type Column = ProductColumn;
    type Context = ();
    type Error = ProductError;

    /// Stamps `created_at` with the current time; the volume is normalised again so a raw
    /// payload built without [`ProductCreate::new`] still stores `"-"` for a blank volume.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            customer_id: params.customer_id,
            name: params.name.trim().to_string(),
            volume: normalize_volume(&params.volume),
            display_order: params.display_order,
            created_at: Some(Utc::now()),
        })
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        match filter {
            ProductFilter::Customer(customer_id) => &self.customer_id == customer_id,
        }
    }

    fn compare(&self, other: &Self, column: &ProductColumn) -> Ordering {
        match column {
            ProductColumn::DisplayOrder => self.display_cmp(other),
            ProductColumn::CreatedAt => self.created_at.cmp(&other.created_at),
            ProductColumn::Name => self.name.cmp(&other.name),
        }
    }

    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if self.name.is_empty() {
            return Err(ProductError::BlankName);
        }
        Ok(())
    }

    /// # Fields Updated
    /// - `name`: rejected when blank
    /// - `volume`: blank becomes `"-"`
    /// - `display_order`
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ProductError::BlankName);
            }
            self.name = name.to_string();
        }
        if let Some(volume) = update.volume {
            self.volume = normalize_volume(&volume);
        }
        if let Some(display_order) = update.display_order {
            self.display_order = Some(display_order);
        }
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use resource_store::nulls_last;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Volume sentinel meaning "no volume".
pub const NO_VOLUME: &str = "-";

pub type ProductId = Uuid;

/// A favorite product on a customer's list.
///
/// # Store
/// This struct implements the [`ActorEntity`](resource_store::ActorEntity) trait, allowing it to
/// be managed by a [`ResourceActor`](resource_store::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - List filter and ordering ([`ProductFilter`], [`ProductColumn`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub customer_id: Uuid,
    pub name: String,
    pub volume: String,
    pub display_order: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the product carries a real volume (anything but `"-"`).
    pub fn has_volume(&self) -> bool {
        self.volume != NO_VOLUME
    }

    /// The list order: `display_order` ascending with missing values last, then `created_at`
    /// ascending with a missing timestamp counted as the epoch.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        nulls_last(self.display_order.as_ref(), other.display_order.as_ref())
            .then_with(|| created_or_epoch(self).cmp(&created_or_epoch(other)))
    }
}

fn created_or_epoch(product: &Product) -> DateTime<Utc> {
    product.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Sorts products into the order customers and the admin see them.
pub fn sort_by_display_order(products: &mut [Product]) {
    products.sort_by(Product::display_cmp);
}

/// Normalises a volume field: blank input becomes `"-"`.
pub fn normalize_volume(volume: &str) -> String {
    let trimmed = volume.trim();
    if trimmed.is_empty() {
        NO_VOLUME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub customer_id: Uuid,
    pub name: String,
    pub volume: String,
    pub display_order: Option<i64>,
}

impl ProductCreate {
    pub fn new(customer_id: Uuid, name: impl Into<String>, volume: &str) -> Self {
        Self {
            customer_id,
            name: name.into().trim().to_string(),
            volume: normalize_volume(volume),
            display_order: None,
        }
    }

    pub fn at_position(self, display_order: i64) -> Self {
        self.with_display_order(Some(display_order))
    }

    pub fn with_display_order(mut self, display_order: Option<i64>) -> Self {
        self.display_order = display_order;
        self
    }
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub volume: Option<String>,
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    Customer(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductColumn {
    /// The full display rule, see [`Product::display_cmp`].
    DisplayOrder,
    CreatedAt,
    Name,
}

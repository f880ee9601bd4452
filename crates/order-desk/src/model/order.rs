//! Transient order types. Orders live only in memory while a customer fills in the form; they
//! are turned into text and shared, never stored.

use crate::model::customer::CustomerId;
use crate::model::product::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordering unit: single bottles or whole cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "バラ")]
    Piece,
    #[serde(rename = "ケース")]
    Case,
}

impl Unit {
    /// The label printed in order text.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Piece => "バラ",
            Unit::Case => "ケース",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the favorites list with the quantity the customer picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: u32,
    pub unit: Unit,
}

impl OrderItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 0,
            unit: Unit::Piece,
        }
    }

    pub fn is_active(&self) -> bool {
        self.quantity > 0
    }
}

/// Something not on the favorites list, typed (or dictated) by the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeInputItem {
    pub description: String,
    pub quantity: u32,
    /// Empty means no volume.
    pub volume: String,
    pub unit: Option<Unit>,
}

impl Default for FreeInputItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: 1,
            volume: String::new(),
            unit: Some(Unit::Piece),
        }
    }
}

impl FreeInputItem {
    pub fn is_active(&self) -> bool {
        !self.description.trim().is_empty() && self.quantity > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub free_items: Vec<FreeInputItem>,
    pub delivery_date: Option<String>,
}

impl Order {
    pub fn active_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|item| item.is_active())
    }

    pub fn active_free_items(&self) -> impl Iterator<Item = &FreeInputItem> {
        self.free_items.iter().filter(|item| item.is_active())
    }

    /// Number of lines that will appear in the order text.
    pub fn active_count(&self) -> usize {
        self.active_items().count() + self.active_free_items().count()
    }
}

//! # Order Form
//!
//! The in-memory state behind a customer's order page: one line per favorite product, any number
//! of free-text lines, and an optional delivery date. Every quantity mutation clamps at zero.

use crate::model::{
    sort_by_display_order, CustomerId, CustomerWithProducts, FreeInputItem, Order, OrderItem,
    ProductId, Unit,
};
use crate::order::formatter::format_order_text;

/// Shown instead of order text when nothing has a quantity.
pub const NOTHING_TO_ORDER: &str = "注文する商品がありません";

/// A single field change on a free-input line.
#[derive(Debug, Clone, PartialEq)]
pub enum FreeItemField {
    Description(String),
    Quantity(i64),
    Volume(String),
    Unit(Option<Unit>),
}

/// Result of [`OrderForm::summary`].
#[derive(Debug, Clone, PartialEq)]
pub enum OrderSummary {
    NothingToOrder,
    Ready { text: String, item_count: usize },
}

#[derive(Debug, Clone)]
pub struct OrderForm {
    customer_id: CustomerId,
    customer_name: String,
    items: Vec<OrderItem>,
    free_items: Vec<FreeInputItem>,
    delivery_date: Option<String>,
}

impl OrderForm {
    /// Starts an empty order: every product at quantity 0, unit piece, in display order.
    pub fn new(customer: &CustomerWithProducts) -> Self {
        let mut products = customer.products.clone();
        sort_by_display_order(&mut products);
        Self {
            customer_id: customer.customer.id,
            customer_name: customer.customer.name.clone(),
            items: products.into_iter().map(OrderItem::new).collect(),
            free_items: Vec::new(),
            delivery_date: None,
        }
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn free_items(&self) -> &[FreeInputItem] {
        &self.free_items
    }

    pub fn delivery_date(&self) -> Option<&str> {
        self.delivery_date.as_deref()
    }

    /// Current quantity of a product; 0 for unknown ids.
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.item(product_id).map_or(0, |item| item.quantity)
    }

    fn item(&self, product_id: ProductId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    fn item_mut(&mut self, product_id: ProductId) -> Option<&mut OrderItem> {
        self.items
            .iter_mut()
            .find(|item| item.product.id == product_id)
    }

    // --- Product lines ---

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if let Some(item) = self.item_mut(product_id) {
            item.quantity = clamp_quantity(quantity);
        }
    }

    pub fn increment(&mut self, product_id: ProductId) {
        if let Some(item) = self.item_mut(product_id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    pub fn decrement(&mut self, product_id: ProductId) {
        if let Some(item) = self.item_mut(product_id) {
            item.quantity = item.quantity.saturating_sub(1);
        }
    }

    /// Typed entry: leading integer of `text`, anything unparsable or negative counts as 0.
    pub fn enter_quantity(&mut self, product_id: ProductId, text: &str) {
        self.set_quantity(product_id, parse_leading_int(text));
    }

    pub fn set_unit(&mut self, product_id: ProductId, unit: Unit) {
        if let Some(item) = self.item_mut(product_id) {
            item.unit = unit;
        }
    }

    // --- Free-input lines ---

    /// Appends an empty line (quantity 1, unit piece) and returns its index.
    pub fn add_free_item(&mut self) -> usize {
        self.free_items.push(FreeInputItem::default());
        self.free_items.len() - 1
    }

    pub fn remove_free_item(&mut self, index: usize) -> Option<FreeInputItem> {
        (index < self.free_items.len()).then(|| self.free_items.remove(index))
    }

    pub fn update_free_item(&mut self, index: usize, field: FreeItemField) {
        let Some(item) = self.free_items.get_mut(index) else {
            return;
        };
        match field {
            FreeItemField::Description(text) => item.description = text,
            FreeItemField::Quantity(quantity) => item.quantity = clamp_quantity(quantity),
            FreeItemField::Volume(volume) => item.volume = volume,
            FreeItemField::Unit(unit) => item.unit = unit,
        }
    }

    pub fn enter_free_quantity(&mut self, index: usize, text: &str) {
        self.update_free_item(index, FreeItemField::Quantity(parse_leading_int(text)));
    }

    pub fn increment_free(&mut self, index: usize) {
        if let Some(item) = self.free_items.get_mut(index) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    pub fn decrement_free(&mut self, index: usize) {
        if let Some(item) = self.free_items.get_mut(index) {
            item.quantity = item.quantity.saturating_sub(1);
        }
    }

    // --- Order ---

    /// Blank input clears the date.
    pub fn set_delivery_date(&mut self, date: &str) {
        let date = date.trim();
        self.delivery_date = (!date.is_empty()).then(|| date.to_string());
    }

    /// Lines that will appear in the order text; the badge on the confirm button.
    pub fn active_item_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_active()).count()
            + self.free_items.iter().filter(|i| i.is_active()).count()
    }

    pub fn to_order(&self) -> Order {
        Order {
            customer_id: self.customer_id,
            customer_name: self.customer_name.clone(),
            items: self.items.clone(),
            free_items: self.free_items.clone(),
            delivery_date: self.delivery_date.clone(),
        }
    }

    pub fn summary(&self) -> OrderSummary {
        let order = self.to_order();
        match order.active_count() {
            0 => OrderSummary::NothingToOrder,
            item_count => OrderSummary::Ready {
                text: format_order_text(&order),
                item_count,
            },
        }
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}

/// Integer prefix of `text` after leading whitespace, with an optional sign. `"12本"` is 12,
/// `"3.9"` is 3, `"abc"` is 0.
fn parse_leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let value = digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0_i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d)));
    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, Product};
    use chrono::Utc;
    use uuid::Uuid;

    fn customer_with(products: &[(&str, &str, Option<i64>)]) -> CustomerWithProducts {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: "居酒屋たなか".to_string(),
            created_at: Utc::now(),
        };
        let products = products
            .iter()
            .map(|(name, volume, display_order)| Product {
                id: Uuid::new_v4(),
                customer_id: customer.id,
                name: name.to_string(),
                volume: volume.to_string(),
                display_order: *display_order,
                created_at: None,
            })
            .collect();
        CustomerWithProducts { customer, products }
    }

    #[test]
    fn test_items_start_at_zero_pieces_in_display_order() {
        let form = OrderForm::new(&customer_with(&[
            ("竹鶴", "-", Some(1)),
            ("赤霧島", "900ml", Some(0)),
            ("生ビール", "タル", None),
        ]));

        let names: Vec<_> = form.items().iter().map(|i| i.product.name.as_str()).collect();
        assert_eq!(names, vec!["赤霧島", "竹鶴", "生ビール"]);
        assert!(form
            .items()
            .iter()
            .all(|i| i.quantity == 0 && i.unit == Unit::Piece));
        assert_eq!(form.active_item_count(), 0);
    }

    #[test]
    fn test_quantity_controls_never_go_negative() {
        let mut form = OrderForm::new(&customer_with(&[("竹鶴", "-", Some(0))]));
        let id = form.items()[0].product.id;

        form.decrement(id);
        assert_eq!(form.quantity(id), 0);

        form.increment(id);
        form.increment(id);
        form.decrement(id);
        assert_eq!(form.quantity(id), 1);

        form.set_quantity(id, -5);
        assert_eq!(form.quantity(id), 0);

        form.enter_quantity(id, "-3");
        assert_eq!(form.quantity(id), 0);
    }

    #[test]
    fn test_typed_quantity_uses_the_leading_integer() {
        let mut form = OrderForm::new(&customer_with(&[("竹鶴", "-", Some(0))]));
        let id = form.items()[0].product.id;

        form.enter_quantity(id, " 12本");
        assert_eq!(form.quantity(id), 12);
        form.enter_quantity(id, "3.9");
        assert_eq!(form.quantity(id), 3);
        form.enter_quantity(id, "abc");
        assert_eq!(form.quantity(id), 0);
        form.enter_quantity(id, "");
        assert_eq!(form.quantity(id), 0);
    }

    #[test]
    fn test_free_items_lifecycle() {
        let mut form = OrderForm::new(&customer_with(&[]));

        let index = form.add_free_item();
        assert_eq!(form.free_items()[index], FreeInputItem::default());
        assert_eq!(form.free_items()[index].quantity, 1);
        // Blank description is not active yet
        assert_eq!(form.active_item_count(), 0);

        form.update_free_item(index, FreeItemField::Description("レモンサワーの素".into()));
        form.update_free_item(index, FreeItemField::Volume("1800ml".into()));
        assert_eq!(form.active_item_count(), 1);

        form.decrement_free(index);
        form.decrement_free(index);
        assert_eq!(form.free_items()[index].quantity, 0);
        assert_eq!(form.active_item_count(), 0);

        form.enter_free_quantity(index, "4");
        assert_eq!(form.free_items()[index].quantity, 4);

        assert!(form.remove_free_item(5).is_none());
        assert!(form.remove_free_item(index).is_some());
        assert!(form.free_items().is_empty());
    }

    #[test]
    fn test_summary_reports_nothing_to_order() {
        let mut form = OrderForm::new(&customer_with(&[("竹鶴", "-", Some(0))]));
        assert_eq!(form.summary(), OrderSummary::NothingToOrder);

        let id = form.items()[0].product.id;
        form.set_quantity(id, 2);
        form.set_unit(id, Unit::Case);
        form.set_delivery_date(" 2026-10-19 ");

        match form.summary() {
            OrderSummary::Ready { text, item_count } => {
                assert_eq!(item_count, 1);
                assert!(text.contains("配送希望日: 2026-10-19"));
                assert!(text.contains("　数量：【2】（ケース）"));
            }
            OrderSummary::NothingToOrder => panic!("expected order text"),
        }

        form.set_delivery_date("   ");
        assert_eq!(form.delivery_date(), None);
    }
}

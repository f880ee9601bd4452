//! # Order Formatter
//!
//! Renders an [`Order`] as the plain text block that is copied or sent through LINE:
//!
//! ```text
//! 【注文内容】
//! 顧客名: 居酒屋たなか
//! 配送希望日: 2026-10-19
//!
//! -- 商品 --
//! ----------------------------
//! ・赤霧島 / 900ml
//! 　数量：【2】（ケース）
//! ----------------------------
//!
//! -- 備考 --
//! ----------------------------
//! ・レモンサワーの素 / 1800ml
//! 　数量：【1】（バラ）
//! ----------------------------
//! ```
//!
//! The delivery line and each section appear only when they have content. Output depends on
//! nothing but the order, so the same order always renders to the same bytes.

use crate::model::Order;

const DIVIDER: &str = "----------------------------";

pub fn format_order_text(order: &Order) -> String {
    let mut lines: Vec<String> = vec![
        "【注文内容】".to_string(),
        format!("顧客名: {}", order.customer_name),
    ];
    if let Some(date) = order.delivery_date.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("配送希望日: {}", date));
    }
    lines.push(String::new());

    let items: Vec<_> = order.active_items().collect();
    if !items.is_empty() {
        lines.push("-- 商品 --".to_string());
        for item in items {
            lines.push(DIVIDER.to_string());
            let volume = if item.product.has_volume() {
                format!(" / {}", item.product.volume)
            } else {
                String::new()
            };
            lines.push(format!("・{}{}", item.product.name, volume));
            lines.push(format!("　数量：【{}】（{}）", item.quantity, item.unit));
        }
        lines.push(DIVIDER.to_string());
        lines.push(String::new());
    }

    let free_items: Vec<_> = order.active_free_items().collect();
    if !free_items.is_empty() {
        lines.push("-- 備考 --".to_string());
        for item in free_items {
            lines.push(DIVIDER.to_string());
            let volume = if item.volume.is_empty() {
                String::new()
            } else {
                format!(" / {}", item.volume)
            };
            lines.push(format!("・{}{}", item.description, volume));
            let unit = item
                .unit
                .map(|u| format!("（{}）", u))
                .unwrap_or_default();
            lines.push(format!("　数量：【{}】{}", item.quantity, unit));
        }
        lines.push(DIVIDER.to_string());
    }

    lines.join("\n")
}

//! Cart models.
//!
//! A cart is just the set of `cart_items` rows for a user; the subtotal is
//! a sum-reduce over the joined menu prices, computed at read time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use cortado_core::{CartItemId, MenuItemId, Price, UserId};

/// One cart row joined with its menu item.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub user_id: UserId,
    pub menu_item_id: MenuItemId,
    pub item_name: String,
    pub unit_price: Price,
    pub quantity: i32,
    pub customizations: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl CartLine {
    /// Line total for this row.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(u32::try_from(self.quantity).unwrap_or(0))
    }
}

/// Cart response: lines plus computed totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub subtotal: Price,
    pub item_count: u32,
}

impl CartView {
    /// Build a view from cart lines, computing subtotal and item count.
    #[must_use]
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let subtotal = items.iter().map(CartLine::line_total).sum();
        let item_count = items
            .iter()
            .map(|line| u32::try_from(line.quantity).unwrap_or(0))
            .sum();
        Self {
            items,
            subtotal,
            item_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(quantity: i32, cents: i64) -> CartLine {
        CartLine {
            id: CartItemId::new(1),
            user_id: "8b9f2f62-6a0e-4c1e-9d9e-0f6f9a3e2b11".parse().unwrap(),
            menu_item_id: MenuItemId::new(1),
            item_name: "Cold Brew".to_string(),
            unit_price: Price::from_cents(cents),
            quantity,
            customizations: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(3, 450).line_total().display(), "$13.50");
    }

    #[test]
    fn test_cart_view_totals() {
        let view = CartView::from_lines(vec![line(2, 450), line(1, 375)]);
        assert_eq!(view.subtotal.display(), "$12.75");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from_lines(Vec::new());
        assert_eq!(view.subtotal, Price::ZERO);
        assert_eq!(view.item_count, 0);
    }
}

//! Order models.
//!
//! Order items denormalize `item_name` and `unit_price` at checkout time so
//! history stays accurate when the menu changes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use cortado_core::{MenuItemId, OrderId, OrderItemId, OrderStatus, Price, UserId};

/// A placed order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total: Price,
    pub created_at: DateTime<Utc>,
}

/// A line item within an order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub menu_item_id: Option<MenuItemId>,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Price,
}

/// An order together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Aggregate signals the barista derives from a user's order history.
#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    /// Total number of orders the user has placed.
    pub total_orders: i64,
    /// When the most recent order was placed, if any.
    pub last_order_at: Option<DateTime<Utc>>,
    /// Name of the most-purchased item, if any.
    pub favorite_item: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_with_items_flattens() {
        let order = Order {
            id: OrderId::new(9),
            user_id: "8b9f2f62-6a0e-4c1e-9d9e-0f6f9a3e2b11".parse().unwrap(),
            status: OrderStatus::Placed,
            total: Price::from_cents(1050),
            created_at: Utc::now(),
        };
        let with_items = OrderWithItems {
            order,
            items: vec![OrderItem {
                id: OrderItemId::new(1),
                order_id: OrderId::new(9),
                menu_item_id: Some(MenuItemId::new(3)),
                item_name: "Mocha".to_string(),
                quantity: 2,
                unit_price: Price::from_cents(525),
            }],
        };
        let json = serde_json::to_value(&with_items).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["status"], "placed");
        assert_eq!(json["items"][0]["item_name"], "Mocha");
    }
}

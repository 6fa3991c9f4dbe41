//! Menu item model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use cortado_core::{MenuItemId, Price};

/// A drink or food item on the menu.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_serializes_price_as_string() {
        let item = MenuItem {
            id: MenuItemId::new(1),
            name: "Oat Latte".to_string(),
            category: "espresso drinks".to_string(),
            description: "Double shot with oat milk".to_string(),
            price: Price::from_cents(525),
            image_url: None,
            available: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "Oat Latte");
        assert_eq!(json["price"], "5.25");
    }
}

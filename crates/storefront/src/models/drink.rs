//! Custom drink models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use cortado_core::{CustomDrinkId, DrinkAddonId, Price, UserId};

/// A saved custom drink recipe.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomDrink {
    pub id: CustomDrinkId,
    pub user_id: UserId,
    pub name: String,
    /// Base drink the recipe starts from (e.g., "espresso", "cold brew").
    pub base: String,
    pub size: String,
    pub created_at: DateTime<Utc>,
}

/// An addon attached to a custom drink.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DrinkAddon {
    pub id: DrinkAddonId,
    pub custom_drink_id: CustomDrinkId,
    pub name: String,
    pub price: Price,
}

/// A custom drink with its addons.
#[derive(Debug, Clone, Serialize)]
pub struct CustomDrinkWithAddons {
    #[serde(flatten)]
    pub drink: CustomDrink,
    pub addons: Vec<DrinkAddon>,
}

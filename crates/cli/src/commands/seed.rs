//! Menu seed command.
//!
//! Inserts a starter menu for local development. Idempotent: runs only
//! when the menu is empty.

use cortado_core::Price;

use super::{CommandError, connect};

/// Starter menu: name, category, description, price in cents.
const MENU: &[(&str, &str, &str, i64)] = &[
    (
        "Cortado",
        "Espresso",
        "Double shot cut with an equal measure of steamed milk",
        425,
    ),
    ("Espresso", "Espresso", "Double shot, straight", 300),
    (
        "Americano",
        "Espresso",
        "Double shot over hot water",
        350,
    ),
    (
        "Cappuccino",
        "Espresso",
        "Double shot with steamed milk and a deep cap of foam",
        450,
    ),
    (
        "Oat Latte",
        "Espresso",
        "Double shot with steamed oat milk",
        525,
    ),
    (
        "Mocha",
        "Espresso",
        "Double shot with dark chocolate and steamed milk",
        550,
    ),
    (
        "Caramel Macchiato",
        "Espresso",
        "Vanilla, steamed milk, espresso, caramel drizzle",
        575,
    ),
    (
        "Cold Brew",
        "Cold",
        "18-hour steep, served over ice",
        475,
    ),
    (
        "Iced Vanilla Latte",
        "Cold",
        "Espresso, vanilla, and cold milk over ice",
        550,
    ),
    ("Earl Grey Tea", "Tea", "Loose leaf, bergamot-forward", 325),
    ("Matcha Latte", "Tea", "Ceremonial grade matcha with steamed milk", 525),
    (
        "Butter Croissant",
        "Pastry",
        "Baked every morning",
        375,
    ),
    (
        "Blueberry Muffin",
        "Pastry",
        "Wild blueberries, crumble top",
        350,
    ),
];

/// Seed the menu with starter data.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
        .fetch_one(&pool)
        .await?;

    if existing > 0 {
        tracing::info!(existing, "Menu already seeded; nothing to do");
        return Ok(());
    }

    for (name, category, description, cents) in MENU {
        sqlx::query(
            r"
            INSERT INTO menu_items (name, category, description, price)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(Price::from_cents(*cents))
        .execute(&pool)
        .await?;
    }

    tracing::info!(items = MENU.len(), "Menu seeded");
    Ok(())
}

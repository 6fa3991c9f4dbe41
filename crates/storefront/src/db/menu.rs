//! Menu repository.

use sqlx::PgPool;

use cortado_core::MenuItemId;

use super::RepositoryError;
use crate::models::menu::MenuItem;

/// Repository for menu item reads. Menu writes happen out of band (seeding,
/// back office), so this repository is read-only.
pub struct MenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all currently available menu items, grouped stably by category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let items = sqlx::query_as::<_, MenuItem>(
            r"
            SELECT id, name, category, description, price, image_url, available, created_at
            FROM menu_items
            WHERE available
            ORDER BY category, name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Get a menu item by ID, available or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let item = sqlx::query_as::<_, MenuItem>(
            r"
            SELECT id, name, category, description, price, image_url, available, created_at
            FROM menu_items
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }
}

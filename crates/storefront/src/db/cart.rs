//! Cart repository.

use sqlx::PgPool;

use cortado_core::{CartItemId, MenuItemId, UserId};

use super::RepositoryError;
use crate::models::cart::CartLine;

const SELECT_LINE: &str = r"
    SELECT ci.id, ci.user_id, ci.menu_item_id,
           mi.name AS item_name, mi.price AS unit_price,
           ci.quantity, ci.customizations, ci.created_at
    FROM cart_items ci
    JOIN menu_items mi ON mi.id = ci.menu_item_id
";

/// Repository for cart line operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart lines for a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(&format!(
            "{SELECT_LINE} WHERE ci.user_id = $1 ORDER BY ci.created_at"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Add a line to the user's cart.
    ///
    /// Duplicate items are intentionally separate lines: two "oat latte"
    /// rows with different customizations are different drinks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the menu item does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_line(
        &self,
        user_id: UserId,
        menu_item_id: MenuItemId,
        quantity: i32,
        customizations: Option<serde_json::Value>,
    ) -> Result<CartLine, RepositoryError> {
        let id: CartItemId = sqlx::query_scalar(
            r"
            INSERT INTO cart_items (user_id, menu_item_id, quantity, customizations)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(menu_item_id)
        .bind(quantity)
        .bind(customizations)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("menu item does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        self.get_line(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Fetch a single cart line by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_line(&self, id: CartItemId) -> Result<Option<CartLine>, RepositoryError> {
        let line = sqlx::query_as::<_, CartLine>(&format!("{SELECT_LINE} WHERE ci.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(line)
    }

    /// Update the quantity on a line. Quantity zero deletes the line.
    ///
    /// Returns the updated line, or `None` if the line was deleted or never
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_quantity(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<Option<CartLine>, RepositoryError> {
        if quantity == 0 {
            self.remove_line(id).await?;
            return Ok(None);
        }

        let updated: Option<CartItemId> = sqlx::query_scalar(
            r"
            UPDATE cart_items
            SET quantity = $2
            WHERE id = $1
            RETURNING id
            ",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        match updated {
            Some(id) => self.get_line(id).await,
            None => Ok(None),
        }
    }

    /// Remove a line from the cart. Removing a missing line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_line(&self, id: CartItemId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

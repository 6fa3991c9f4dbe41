//! Custom drink repository.

use sqlx::PgPool;

use cortado_core::{CustomDrinkId, Price, UserId};

use super::RepositoryError;
use crate::models::drink::{CustomDrink, CustomDrinkWithAddons, DrinkAddon};

/// An addon to attach when creating a custom drink.
#[derive(Debug, Clone)]
pub struct NewAddon {
    pub name: String,
    pub price: Price,
}

/// Repository for saved custom drink recipes.
pub struct CustomDrinkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomDrinkRepository<'a> {
    /// Create a new custom drink repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's saved drinks with their addons, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CustomDrinkWithAddons>, RepositoryError> {
        let drinks = sqlx::query_as::<_, CustomDrink>(
            r"
            SELECT id, user_id, name, base, size, created_at
            FROM custom_drinks
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut result = Vec::with_capacity(drinks.len());
        for drink in drinks {
            let addons = sqlx::query_as::<_, DrinkAddon>(
                r"
                SELECT id, custom_drink_id, name, price
                FROM drink_addons
                WHERE custom_drink_id = $1
                ORDER BY id
                ",
            )
            .bind(drink.id)
            .fetch_all(self.pool)
            .await?;
            result.push(CustomDrinkWithAddons { drink, addons });
        }

        Ok(result)
    }

    /// Save a new custom drink with its addons in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back.
    pub async fn create(
        &self,
        user_id: UserId,
        name: &str,
        base: &str,
        size: &str,
        addons: &[NewAddon],
    ) -> Result<CustomDrinkWithAddons, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let drink = sqlx::query_as::<_, CustomDrink>(
            r"
            INSERT INTO custom_drinks (user_id, name, base, size)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, base, size, created_at
            ",
        )
        .bind(user_id)
        .bind(name)
        .bind(base)
        .bind(size)
        .fetch_one(&mut *tx)
        .await?;

        let mut saved_addons = Vec::with_capacity(addons.len());
        for addon in addons {
            let saved = sqlx::query_as::<_, DrinkAddon>(
                r"
                INSERT INTO drink_addons (custom_drink_id, name, price)
                VALUES ($1, $2, $3)
                RETURNING id, custom_drink_id, name, price
                ",
            )
            .bind(drink.id)
            .bind(&addon.name)
            .bind(addon.price)
            .fetch_one(&mut *tx)
            .await?;
            saved_addons.push(saved);
        }

        tx.commit().await?;

        Ok(CustomDrinkWithAddons {
            drink,
            addons: saved_addons,
        })
    }

    /// Delete a drink (addons cascade). Returns whether a row was deleted.
    ///
    /// The owner check keeps one user from deleting another's recipe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(
        &self,
        id: CustomDrinkId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM custom_drinks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! Product review repository.

use sqlx::PgPool;

use cortado_core::{MenuItemId, UserId};

use super::RepositoryError;
use crate::models::review::Review;

/// Repository for menu item reviews.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List reviews for a menu item, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_item(
        &self,
        menu_item_id: MenuItemId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(
            r"
            SELECT id, menu_item_id, user_id, rating, comment, created_at
            FROM product_reviews
            WHERE menu_item_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(menu_item_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Create a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the menu item does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        menu_item_id: MenuItemId,
        user_id: UserId,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            r"
            INSERT INTO product_reviews (menu_item_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, menu_item_id, user_id, rating, comment, created_at
            ",
        )
        .bind(menu_item_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
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

        Ok(review)
    }
}

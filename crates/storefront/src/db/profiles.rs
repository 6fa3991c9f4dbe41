//! Profile repository.

use sqlx::PgPool;

use cortado_core::UserId;

use super::RepositoryError;
use crate::models::profile::Profile;

/// Repository for customer profiles.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by user ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let profile = sqlx::query_as::<_, Profile>(
            r"
            SELECT user_id, display_name, favorite_drink, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// Create or update a profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        display_name: &str,
        favorite_drink: Option<&str>,
    ) -> Result<Profile, RepositoryError> {
        let profile = sqlx::query_as::<_, Profile>(
            r"
            INSERT INTO profiles (user_id, display_name, favorite_drink)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET display_name = $2,
                favorite_drink = $3,
                updated_at = now()
            RETURNING user_id, display_name, favorite_drink, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(display_name)
        .bind(favorite_drink)
        .fetch_one(self.pool)
        .await?;

        Ok(profile)
    }
}

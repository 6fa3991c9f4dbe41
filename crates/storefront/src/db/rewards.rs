//! Rewards repository.

use chrono::Utc;
use sqlx::PgPool;

use cortado_core::UserId;

use super::RepositoryError;
use crate::models::reward::Reward;

/// Repository for loyalty point balances.
///
/// Accrual happens inside the checkout transaction (see
/// `OrderRepository::checkout`); this repository covers reads and
/// redemptions.
pub struct RewardsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RewardsRepository<'a> {
    /// Create a new rewards repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's balance, defaulting to zero for users with no row yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_default(&self, user_id: UserId) -> Result<Reward, RepositoryError> {
        let reward = sqlx::query_as::<_, Reward>(
            r"
            SELECT user_id, points, lifetime_points, updated_at
            FROM rewards
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(reward.unwrap_or_else(|| Reward {
            user_id,
            points: 0,
            lifetime_points: 0,
            updated_at: Utc::now(),
        }))
    }

    /// Deduct `points` from the user's spendable balance.
    ///
    /// Returns `None` when the balance is insufficient (or no row exists);
    /// the guard lives in the UPDATE's WHERE clause so concurrent
    /// redemptions cannot overdraw.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn redeem(
        &self,
        user_id: UserId,
        points: i64,
    ) -> Result<Option<Reward>, RepositoryError> {
        let reward = sqlx::query_as::<_, Reward>(
            r"
            UPDATE rewards
            SET points = points - $2,
                updated_at = now()
            WHERE user_id = $1 AND points >= $2
            RETURNING user_id, points, lifetime_points, updated_at
            ",
        )
        .bind(user_id)
        .bind(points)
        .fetch_optional(self.pool)
        .await?;

        Ok(reward)
    }
}

//! Loyalty rewards models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use cortado_core::{Tier, UserId};

/// A user's loyalty balance row.
///
/// `points` is the spendable balance; `lifetime_points` only ever grows and
/// drives the tier ladder, so redemptions never demote anyone.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reward {
    pub user_id: UserId,
    pub points: i64,
    pub lifetime_points: i64,
    pub updated_at: DateTime<Utc>,
}

/// Rewards API response: balance plus derived tier info.
#[derive(Debug, Clone, Serialize)]
pub struct RewardStatus {
    pub points: i64,
    pub lifetime_points: i64,
    pub tier: Tier,
    pub points_to_next_tier: Option<i64>,
}

impl From<&Reward> for RewardStatus {
    fn from(reward: &Reward) -> Self {
        Self {
            points: reward.points,
            lifetime_points: reward.lifetime_points,
            tier: Tier::for_points(reward.lifetime_points),
            points_to_next_tier: Tier::points_to_next(reward.lifetime_points),
        }
    }
}

//! User profile model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use cortado_core::UserId;

/// A customer profile. One row per auth-provider user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: String,
    pub favorite_drink: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

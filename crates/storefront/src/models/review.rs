//! Product review model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use cortado_core::{MenuItemId, ReviewId, UserId};

/// A review left on a menu item. Rating is 1-5, enforced at the API edge
/// and by a CHECK constraint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub menu_item_id: MenuItemId,
    pub user_id: UserId,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

//! In-memory menu cache.
//!
//! The menu changes rarely but is read on every storefront page load and
//! every barista chat turn, so it is cached with a short TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::db::{MenuRepository, RepositoryError};
use crate::models::MenuItem;

const MENU_TTL: Duration = Duration::from_secs(60);

/// Cached view of the available menu.
#[derive(Clone)]
pub struct MenuCache {
    cache: Cache<(), Arc<Vec<MenuItem>>>,
}

impl MenuCache {
    #[must_use]
    pub fn new() -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(MENU_TTL)
            .build();
        Self { cache }
    }

    /// The available menu, fetched from the database on a cache miss.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is cold and the database read fails.
    pub async fn get(&self, pool: &PgPool) -> Result<Arc<Vec<MenuItem>>, RepositoryError> {
        if let Some(menu) = self.cache.get(&()).await {
            return Ok(menu);
        }

        let menu = Arc::new(MenuRepository::new(pool).list_available().await?);
        self.cache.insert((), Arc::clone(&menu)).await;
        Ok(menu)
    }

    /// Drop the cached menu so the next read hits the database.
    pub async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
    }
}

impl Default for MenuCache {
    fn default() -> Self {
        Self::new()
    }
}

//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::barista::CompletionClient;
use crate::config::StorefrontConfig;
use crate::services::{EmailService, MenuCache};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    completion: CompletionClient,
    menu_cache: MenuCache,
    email: Option<EmailService>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The email service is only constructed when SMTP is configured; the
    /// contact endpoint reports missing configuration otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay cannot be configured.
    pub fn new(
        config: StorefrontConfig,
        pool: PgPool,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let completion = CompletionClient::new(&config.barista);
        let email = config.smtp.as_ref().map(EmailService::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                completion,
                menu_cache: MenuCache::new(),
                email,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the completion API client.
    #[must_use]
    pub fn completion(&self) -> &CompletionClient {
        &self.inner.completion
    }

    /// Get a reference to the menu cache.
    #[must_use]
    pub fn menu_cache(&self) -> &MenuCache {
        &self.inner.menu_cache
    }

    /// The email service, if SMTP is configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }
}

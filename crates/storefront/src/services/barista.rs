//! Virtual barista chat orchestration.
//!
//! One pass per request: gather what we know about the customer, run the
//! discount policy, render the system prompt, call the completion API,
//! then scan the reply for a surfaced discount code.
//!
//! Auxiliary lookups (order history, menu) degrade instead of failing:
//! a database error here loses personalization, not the chat turn.

use chrono::Utc;
use sqlx::PgPool;
use tracing::{instrument, warn};

use cortado_core::{DiscountCode, Tier, UserId};

use crate::barista::discount::{self, CustomerSignals};
use crate::barista::prompt::render_system_prompt;
use crate::barista::{CompletionClient, CompletionError, Message};
use crate::db::{OrderRepository, RewardsRepository};
use crate::models::{MenuItem, OrderHistory};

use super::MenuCache;

/// Conversation turns kept for context, beyond the new message.
const MAX_HISTORY_TURNS: usize = 10;

/// Result of a barista chat turn.
#[derive(Debug)]
pub struct ChatOutcome {
    /// The model's reply text.
    pub reply: String,
    /// Discount surfaced from the reply, if any.
    pub discount: Option<DiscountCode>,
}

/// Run one chat turn against the completion API.
///
/// # Errors
///
/// Returns an error if the completion call fails or returns no text.
/// Database lookups never fail the turn.
#[instrument(skip_all, fields(authenticated = user_id.is_some()))]
pub async fn chat(
    pool: &PgPool,
    client: &CompletionClient,
    menu_cache: &MenuCache,
    user_id: Option<UserId>,
    message: &str,
    history: Vec<Message>,
    active_codes: &[DiscountCode],
) -> Result<ChatOutcome, CompletionError> {
    let order_history = load_order_history(pool, user_id).await;
    let tier = load_tier(pool, user_id).await;
    let menu = load_menu(pool, menu_cache).await;

    let now = Utc::now();
    let signals = CustomerSignals {
        message,
        authenticated: user_id.is_some(),
        total_orders: order_history.total_orders,
        days_since_last_order: order_history
            .last_order_at
            .map(|at| discount::days_since(at, now)),
        favorite_item: order_history.favorite_item.as_deref(),
    };

    let eligibility = discount::evaluate_eligibility(&signals, rand::random());
    let tier_name = tier.map(|t| t.to_string());
    let system = render_system_prompt(
        &menu,
        signals.favorite_item,
        tier_name.as_deref(),
        &eligibility,
    );

    let mut messages: Vec<Message> = history
        .into_iter()
        .rev()
        .take(MAX_HISTORY_TURNS)
        .rev()
        .collect();
    messages.push(Message::user(message));

    let response = client.chat(messages, Some(system)).await?;
    let reply = response.text();
    if reply.is_empty() {
        return Err(CompletionError::EmptyResponse);
    }

    let discount = discount::extract_discount(&reply, &eligibility, active_codes, now);

    Ok(ChatOutcome { reply, discount })
}

/// Order history for the signals, or an empty default for guests and on
/// lookup failure.
async fn load_order_history(pool: &PgPool, user_id: Option<UserId>) -> OrderHistory {
    let Some(user_id) = user_id else {
        return OrderHistory::default();
    };

    match OrderRepository::new(pool).history(user_id).await {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "Order history lookup failed; continuing without it");
            OrderHistory::default()
        }
    }
}

/// The customer's loyalty tier, or `None` for guests and on lookup failure.
async fn load_tier(pool: &PgPool, user_id: Option<UserId>) -> Option<Tier> {
    let user_id = user_id?;

    match RewardsRepository::new(pool).get_or_default(user_id).await {
        Ok(reward) => Some(Tier::for_points(reward.lifetime_points)),
        Err(e) => {
            warn!(error = %e, "Rewards lookup failed; continuing without it");
            None
        }
    }
}

/// The cached menu, or an empty list on lookup failure.
async fn load_menu(pool: &PgPool, menu_cache: &MenuCache) -> Vec<MenuItem> {
    match menu_cache.get(pool).await {
        Ok(menu) => menu.as_ref().clone(),
        Err(e) => {
            warn!(error = %e, "Menu lookup failed; continuing without it");
            Vec::new()
        }
    }
}

//! Discount-eligibility policy and reply post-processing.
//!
//! Eligibility is decided before the completion call from the customer's
//! order history and message text; the decision steers the system prompt.
//! After the call, the free-form reply is scanned for a code the model
//! invented, which is surfaced to the client as a structured discount.
//!
//! Code extraction is keyword/regex based and deliberately conservative:
//! a token only counts when eligibility was true, discount words appear
//! near it, it is not already active, and the percentage is in (0, 25].

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use std::sync::LazyLock;

use cortado_core::{DiscountCode, ProductType};

/// Message keywords that force eligibility (explicit request).
const REQUEST_KEYWORDS: [&str; 6] = ["discount", "deal", "coupon", "promo", "offer", "code"];

/// Words that must appear near an extracted token for it to count as a code.
const INDICATOR_WORDS: [&str; 6] = ["discount", "off", "code", "promo", "deal", "save"];

/// Days a surfaced code stays valid.
pub const EXPIRY_DAYS: i64 = 7;

/// Largest percentage we will surface as a structured discount.
const MAX_PERCENTAGE: u8 = 25;

/// A customer counts as lapsed once their latest order is this many days old.
const LAPSED_AFTER_DAYS: i64 = 3;

/// Order count at which a customer counts as loyal.
const LOYAL_ORDER_COUNT: i64 = 5;

const LOYAL_OFFER_PROBABILITY: f64 = 0.2;
const GUEST_OFFER_PROBABILITY: f64 = 0.1;

/// Bytes of context on each side of a token that are searched for
/// discount-indicating words.
const INDICATOR_WINDOW: usize = 80;

/// All-caps token that looks like a promo code (e.g. `LATTE15`).
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][A-Z0-9]{3,}\b").expect("static regex")
});

/// A percentage like `15%` or `15 %`.
static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3})\s*%").expect("static regex")
});

/// Phrase following "% off", used to infer the discount's product scope.
static SCOPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)%\s*off\s+(?:any\s+|all\s+|your\s+next\s+)?([a-zA-Z ]{3,40})")
        .expect("static regex")
});

/// What the policy knows about the customer sending this message.
#[derive(Debug, Clone, Default)]
pub struct CustomerSignals<'a> {
    /// The chat message text.
    pub message: &'a str,
    /// Whether the request carried a valid user id.
    pub authenticated: bool,
    /// Total orders the customer has placed.
    pub total_orders: i64,
    /// Whole days since the most recent order, if any.
    pub days_since_last_order: Option<i64>,
    /// Name of the most-purchased item, if any.
    pub favorite_item: Option<&'a str>,
}

/// Why the customer is being offered a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferReason {
    /// The message asked for a discount outright.
    ExplicitRequest,
    /// Latest order is at least three days old.
    LapsedCustomer,
    /// Five or more orders; offered probabilistically.
    LoyalCustomer,
    /// Has an account but has never ordered.
    NewCustomer,
    /// No account; offered probabilistically.
    Guest,
}

/// A decided offer: reason, suggested percentage range, optional scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub reason: OfferReason,
    pub percent_min: u8,
    pub percent_max: u8,
    /// Drink category the offer should be steered to, if any.
    pub product_type: Option<ProductType>,
}

/// Outcome of the eligibility policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Offer a discount in the suggested range.
    Offer(Offer),
    /// Do not mention discounts at all.
    NoOffer,
}

impl Eligibility {
    /// Whether a discount may be surfaced from the reply.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Offer(_))
    }
}

/// Evaluate the discount policy. Rules are checked in order; the first
/// match wins.
///
/// `roll` is a uniform sample in `[0, 1)` supplied by the caller (use
/// `rand::random()`), so the probabilistic branches stay deterministic
/// under test. At most one probabilistic branch is ever reached, so a
/// single roll suffices.
#[must_use]
pub fn evaluate_eligibility(signals: &CustomerSignals<'_>, roll: f64) -> Eligibility {
    let reason = decide_reason(signals, roll);

    reason.map_or(Eligibility::NoOffer, |reason| {
        let (percent_min, percent_max) = suggested_range(reason);
        Eligibility::Offer(Offer {
            reason,
            percent_min,
            percent_max,
            product_type: product_scope(signals),
        })
    })
}

fn decide_reason(signals: &CustomerSignals<'_>, roll: f64) -> Option<OfferReason> {
    if mentions_discount(signals.message) {
        return Some(OfferReason::ExplicitRequest);
    }

    if signals
        .days_since_last_order
        .is_some_and(|days| days >= LAPSED_AFTER_DAYS)
    {
        return Some(OfferReason::LapsedCustomer);
    }

    if signals.total_orders >= LOYAL_ORDER_COUNT {
        return (roll < LOYAL_OFFER_PROBABILITY).then_some(OfferReason::LoyalCustomer);
    }

    if signals.authenticated && signals.total_orders == 0 {
        return Some(OfferReason::NewCustomer);
    }

    if !signals.authenticated {
        return (roll < GUEST_OFFER_PROBABILITY).then_some(OfferReason::Guest);
    }

    None
}

const fn suggested_range(reason: OfferReason) -> (u8, u8) {
    match reason {
        OfferReason::ExplicitRequest => (10, 20),
        OfferReason::LapsedCustomer => (20, 25),
        OfferReason::LoyalCustomer => (10, 15),
        OfferReason::NewCustomer => (15, 15),
        OfferReason::Guest => (10, 10),
    }
}

/// True when the message contains any discount-request keyword.
fn mentions_discount(message: &str) -> bool {
    let lower = message.to_lowercase();
    REQUEST_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Scope the offer to a drink category: the favorite item's name wins,
/// then a mention in the current message.
fn product_scope(signals: &CustomerSignals<'_>) -> Option<ProductType> {
    signals
        .favorite_item
        .and_then(ProductType::detect)
        .or_else(|| ProductType::detect(signals.message))
}

/// Whole days between `last_order_at` and `now`, for [`CustomerSignals`].
#[must_use]
pub fn days_since(last_order_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_order_at).num_days()
}

// =============================================================================
// Reply post-processing
// =============================================================================

/// Scan a generated reply for a discount code and surface it as a
/// structured [`DiscountCode`].
///
/// Returns `None` unless all of these hold:
/// - `eligibility` decided an offer before the completion call
/// - the reply contains an all-caps token that is not already in
///   `active_codes`
/// - a discount-indicating word appears near the token
/// - a percentage in `(0, 25]` appears somewhere in the reply; the one
///   closest to the token wins, so unrelated figures elsewhere do not
///   mislabel the code
#[must_use]
pub fn extract_discount(
    reply: &str,
    eligibility: &Eligibility,
    active_codes: &[DiscountCode],
    now: DateTime<Utc>,
) -> Option<DiscountCode> {
    if !eligibility.is_eligible() {
        return None;
    }

    for m in CODE_RE.find_iter(reply) {
        let token = m.as_str();

        // The indicator words themselves show up capitalized in replies
        // ("use this CODE") and are never codes.
        if INDICATOR_WORDS
            .iter()
            .any(|w| token.eq_ignore_ascii_case(w))
        {
            continue;
        }

        if active_codes
            .iter()
            .any(|c| c.code.eq_ignore_ascii_case(token))
        {
            continue;
        }

        if !has_nearby_indicator(reply, m.start(), m.end()) {
            continue;
        }

        let Some(percentage) = nearest_percentage(reply, m.start(), m.end()) else {
            continue;
        };

        return Some(DiscountCode {
            code: token.to_string(),
            percentage,
            expiry: now + Duration::days(EXPIRY_DAYS),
            product_type: infer_product_scope(reply, token),
        });
    }

    None
}

/// The in-range percentage closest to the token at `start..end`.
///
/// Replies sometimes carry unrelated figures ("prices rose 30%"), so
/// out-of-range matches are ignored and proximity to the code decides
/// between the rest.
fn nearest_percentage(reply: &str, start: usize, end: usize) -> Option<u8> {
    PERCENT_RE
        .captures_iter(reply)
        .filter_map(|capture| {
            let m = capture.get(1)?;
            let value: u32 = m.as_str().parse().ok()?;
            let value = u8::try_from(value).ok()?;
            (value > 0 && value <= MAX_PERCENTAGE).then_some((m, value))
        })
        .min_by_key(|(m, _)| {
            if m.start() >= end {
                m.start() - end
            } else {
                start.saturating_sub(m.end())
            }
        })
        .map(|(_, value)| value)
}

/// True when a discount-indicating word appears within the window around
/// the token.
fn has_nearby_indicator(reply: &str, start: usize, end: usize) -> bool {
    let lo = start.saturating_sub(INDICATOR_WINDOW);
    let hi = (end + INDICATOR_WINDOW).min(reply.len());
    // Widen to char boundaries rather than panicking on multi-byte text
    let lo = (0..=lo).rev().find(|&i| reply.is_char_boundary(i)).unwrap_or(0);
    let hi = (hi..=reply.len())
        .find(|&i| reply.is_char_boundary(i))
        .unwrap_or(reply.len());
    let window = reply.get(lo..hi).unwrap_or(reply).to_lowercase();

    INDICATOR_WORDS.iter().any(|w| window.contains(w))
}

/// Infer the product scope from an "off ..." phrase, falling back to the
/// code text itself (`LATTE15` implies Latte).
fn infer_product_scope(reply: &str, code: &str) -> Option<ProductType> {
    SCOPE_RE
        .captures(reply)
        .and_then(|c| c.get(1))
        .and_then(|phrase| ProductType::detect(phrase.as_str()))
        .or_else(|| ProductType::detect_in_code(code))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-08-30T12:00:00Z".parse().unwrap()
    }

    fn active(code: &str) -> DiscountCode {
        DiscountCode {
            code: code.to_string(),
            percentage: 10,
            expiry: now() + Duration::days(7),
            product_type: None,
        }
    }

    fn eligible() -> Eligibility {
        Eligibility::Offer(Offer {
            reason: OfferReason::ExplicitRequest,
            percent_min: 10,
            percent_max: 20,
            product_type: None,
        })
    }

    // --- eligibility policy ---

    #[test]
    fn test_explicit_request_always_eligible() {
        // Regular customer with a fresh order: every other rule says no
        let signals = CustomerSignals {
            message: "got any promo code for me?",
            authenticated: true,
            total_orders: 2,
            days_since_last_order: Some(0),
            favorite_item: None,
        };
        let result = evaluate_eligibility(&signals, 0.99);
        match result {
            Eligibility::Offer(offer) => assert_eq!(offer.reason, OfferReason::ExplicitRequest),
            Eligibility::NoOffer => panic!("explicit request must be eligible"),
        }
    }

    #[test]
    fn test_lapsed_boundary_exactly_three_days() {
        let signals = CustomerSignals {
            message: "what's good today?",
            authenticated: true,
            total_orders: 2,
            days_since_last_order: Some(3),
            favorite_item: None,
        };
        match evaluate_eligibility(&signals, 0.99) {
            Eligibility::Offer(offer) => {
                assert_eq!(offer.reason, OfferReason::LapsedCustomer);
                assert_eq!((offer.percent_min, offer.percent_max), (20, 25));
            }
            Eligibility::NoOffer => panic!("3-day-old order is the lapsed boundary"),
        }
    }

    #[test]
    fn test_recent_customer_not_eligible_without_keyword() {
        // 2-day-old order, under 5 orders, has an account: every rule misses
        let signals = CustomerSignals {
            message: "what's good today?",
            authenticated: true,
            total_orders: 2,
            days_since_last_order: Some(2),
            favorite_item: None,
        };
        assert_eq!(evaluate_eligibility(&signals, 0.0), Eligibility::NoOffer);
    }

    #[test]
    fn test_loyal_customer_probabilistic() {
        let signals = CustomerSignals {
            message: "the usual please",
            authenticated: true,
            total_orders: 8,
            days_since_last_order: Some(1),
            favorite_item: None,
        };
        match evaluate_eligibility(&signals, 0.19) {
            Eligibility::Offer(offer) => {
                assert_eq!(offer.reason, OfferReason::LoyalCustomer);
                assert_eq!((offer.percent_min, offer.percent_max), (10, 15));
            }
            Eligibility::NoOffer => panic!("roll under 0.2 must offer"),
        }
        assert_eq!(evaluate_eligibility(&signals, 0.20), Eligibility::NoOffer);
    }

    #[test]
    fn test_new_authenticated_customer() {
        let signals = CustomerSignals {
            message: "hi! first time here",
            authenticated: true,
            total_orders: 0,
            days_since_last_order: None,
            favorite_item: None,
        };
        match evaluate_eligibility(&signals, 0.99) {
            Eligibility::Offer(offer) => {
                assert_eq!(offer.reason, OfferReason::NewCustomer);
                assert_eq!((offer.percent_min, offer.percent_max), (15, 15));
            }
            Eligibility::NoOffer => panic!("new account must be offered 15%"),
        }
    }

    #[test]
    fn test_guest_probabilistic() {
        let signals = CustomerSignals {
            message: "hello",
            authenticated: false,
            total_orders: 0,
            days_since_last_order: None,
            favorite_item: None,
        };
        assert!(evaluate_eligibility(&signals, 0.09).is_eligible());
        assert_eq!(evaluate_eligibility(&signals, 0.10), Eligibility::NoOffer);
    }

    #[test]
    fn test_scope_from_favorite_item() {
        let signals = CustomerSignals {
            message: "anything new?",
            authenticated: true,
            total_orders: 2,
            days_since_last_order: Some(5),
            favorite_item: Some("Iced Vanilla Latte"),
        };
        match evaluate_eligibility(&signals, 0.99) {
            Eligibility::Offer(offer) => assert_eq!(offer.product_type, Some(ProductType::Latte)),
            Eligibility::NoOffer => panic!("lapsed customer must be eligible"),
        }
    }

    #[test]
    fn test_scope_from_message_when_no_favorite() {
        let signals = CustomerSignals {
            message: "do you have a cold brew deal?",
            authenticated: false,
            total_orders: 0,
            days_since_last_order: None,
            favorite_item: None,
        };
        match evaluate_eligibility(&signals, 0.99) {
            Eligibility::Offer(offer) => {
                assert_eq!(offer.product_type, Some(ProductType::ColdBrew));
            }
            Eligibility::NoOffer => panic!("'deal' is an explicit request"),
        }
    }

    #[test]
    fn test_days_since() {
        let last: DateTime<Utc> = "2026-08-27T12:00:00Z".parse().unwrap();
        assert_eq!(days_since(last, now()), 3);
        let last: DateTime<Utc> = "2026-08-28T13:00:00Z".parse().unwrap();
        assert_eq!(days_since(last, now()), 1);
    }

    // --- reply post-processing ---

    #[test]
    fn test_extract_basic_code() {
        let reply = "Sure! Use code LATTE15 for 15% off any latte this week.";
        let discount = extract_discount(reply, &eligible(), &[], now()).unwrap();
        assert_eq!(discount.code, "LATTE15");
        assert_eq!(discount.percentage, 15);
        assert_eq!(discount.product_type, Some(ProductType::Latte));
        assert_eq!(discount.expiry, now() + Duration::days(7));
    }

    #[test]
    fn test_extract_nothing_when_not_eligible() {
        let reply = "Use code LATTE15 for 15% off!";
        assert!(extract_discount(reply, &Eligibility::NoOffer, &[], now()).is_none());
    }

    #[test]
    fn test_percentage_out_of_range_suppressed() {
        let reply = "Use code MEGA50 for 50% off everything!";
        assert!(extract_discount(reply, &eligible(), &[], now()).is_none());
        let reply = "Use code ZERO0 for 0% off.";
        assert!(extract_discount(reply, &eligible(), &[], now()).is_none());
    }

    #[test]
    fn test_already_active_code_not_resurfaced() {
        let reply = "You already have LATTE15 for 15% off lattes!";
        let codes = [active("LATTE15")];
        assert!(extract_discount(reply, &eligible(), &codes, now()).is_none());
    }

    #[test]
    fn test_skips_active_code_but_takes_fresh_one() {
        let reply = "LATTE15 is still active, but here's BREW20: 20% off cold brew.";
        let codes = [active("LATTE15")];
        let discount = extract_discount(reply, &eligible(), &codes, now()).unwrap();
        assert_eq!(discount.code, "BREW20");
        assert_eq!(discount.percentage, 20);
        assert_eq!(discount.product_type, Some(ProductType::ColdBrew));
    }

    #[test]
    fn test_no_indicator_words_near_token() {
        // An all-caps token with a percentage elsewhere but no discount
        // language around it is not treated as a code. Padding pushes the
        // indicator word out of the search window.
        let padding = "the seasonal tasting flight returns next month with new roasts. ".repeat(3);
        let reply = format!("Our WIFI network password changed. {padding}Menu prices rose 5% recently.");
        assert!(extract_discount(&reply, &eligible(), &[], now()).is_none());
    }

    #[test]
    fn test_indicator_word_itself_is_not_a_code() {
        let reply = "I can give you a DEAL: take 10% off with CREMA10 today.";
        let discount = extract_discount(reply, &eligible(), &[], now()).unwrap();
        assert_eq!(discount.code, "CREMA10");
    }

    #[test]
    fn test_scope_from_code_text_fallback() {
        let reply = "Enjoy 15% savings with code MOCHA15, valid on your next visit. Save big!";
        let discount = extract_discount(reply, &eligible(), &[], now()).unwrap();
        assert_eq!(discount.product_type, Some(ProductType::Mocha));
    }

    #[test]
    fn test_unscoped_code() {
        let reply = "Take 10% off your whole order with code THANKS10.";
        let discount = extract_discount(reply, &eligible(), &[], now()).unwrap();
        assert_eq!(discount.code, "THANKS10");
        assert_eq!(discount.product_type, None);
    }

    #[test]
    fn test_unrelated_percentage_does_not_mask_code() {
        // The 30% is commentary; the code's own 15% must win
        let reply = "Bean prices rose 30% this year, but here's 15% off with code LATTE15!";
        let discount = extract_discount(reply, &eligible(), &[], now()).unwrap();
        assert_eq!(discount.code, "LATTE15");
        assert_eq!(discount.percentage, 15);
    }

    #[test]
    fn test_percentage_nearest_to_code_wins() {
        let reply = "BREW20 gets you 20% off cold brew, and members already save 10% on beans.";
        let discount = extract_discount(reply, &eligible(), &[], now()).unwrap();
        assert_eq!(discount.code, "BREW20");
        assert_eq!(discount.percentage, 20);
    }

    #[test]
    fn test_short_tokens_ignored() {
        // Tokens under four characters never match the code pattern
        let reply = "Our VIP menu has 15% off espresso with code SHOT15.";
        let discount = extract_discount(reply, &eligible(), &[], now()).unwrap();
        assert_eq!(discount.code, "SHOT15");
    }
}

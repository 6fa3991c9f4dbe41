//! System prompt assembly for the virtual barista.
//!
//! The prompt carries the live menu, what we know about the customer, and
//! the outcome of the discount policy. When no offer was decided the
//! prompt tells the model not to mention discounts at all, which is what
//! makes the post-processing in [`super::discount`] safe to trust.

use askama::Template;

use crate::models::MenuItem;

use super::discount::Eligibility;

/// System prompt for a barista chat turn.
#[derive(Template)]
#[template(path = "barista/system_prompt.txt")]
struct SystemPromptTemplate<'a> {
    menu_lines: &'a [String],
    favorite_item: Option<&'a str>,
    tier: Option<&'a str>,
    offer: Option<OfferLine>,
}

/// Discount guidance rendered into the prompt.
struct OfferLine {
    /// Human-readable percentage suggestion, e.g. "15%" or "10-20%".
    range: String,
    /// Drink category to steer the offer toward.
    scope: Option<String>,
}

/// Render the barista system prompt.
#[must_use]
pub fn render_system_prompt(
    menu: &[MenuItem],
    favorite_item: Option<&str>,
    tier: Option<&str>,
    eligibility: &Eligibility,
) -> String {
    let menu_lines: Vec<String> = menu
        .iter()
        .map(|item| format!("{} ({}) - {}", item.name, item.category, item.price.display()))
        .collect();

    let offer = match eligibility {
        Eligibility::Offer(offer) => Some(OfferLine {
            range: if offer.percent_min == offer.percent_max {
                format!("{}%", offer.percent_min)
            } else {
                format!("{}-{}%", offer.percent_min, offer.percent_max)
            },
            scope: offer.product_type.map(|p| p.keyword().to_string()),
        }),
        Eligibility::NoOffer => None,
    };

    SystemPromptTemplate {
        menu_lines: &menu_lines,
        favorite_item,
        tier,
        offer,
    }
    .render()
    .unwrap_or_else(|_| String::from("You are a friendly coffee shop barista."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barista::discount::{Offer, OfferReason};
    use cortado_core::ProductType;

    fn menu_item(name: &str, category: &str, cents: i64) -> MenuItem {
        use cortado_core::{MenuItemId, Price};
        MenuItem {
            id: MenuItemId::new(1),
            name: name.to_string(),
            category: category.to_string(),
            description: String::new(),
            price: Price::from_cents(cents),
            image_url: None,
            available: true,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_prompt_includes_menu_and_favorite() {
        let menu = vec![menu_item("Cortado", "Espresso", 425)];
        let prompt =
            render_system_prompt(&menu, Some("Cortado"), Some("Gold"), &Eligibility::NoOffer);
        assert!(prompt.contains("Cortado (Espresso) - $4.25"));
        assert!(prompt.contains("favorite"));
        assert!(prompt.contains("Gold"));
    }

    #[test]
    fn test_no_offer_forbids_discounts() {
        let prompt = render_system_prompt(&[], None, None, &Eligibility::NoOffer);
        assert!(prompt.contains("Do not offer"));
        assert!(!prompt.contains("one-time discount"));
    }

    #[test]
    fn test_offer_carries_range_and_scope() {
        let eligibility = Eligibility::Offer(Offer {
            reason: OfferReason::LapsedCustomer,
            percent_min: 20,
            percent_max: 25,
            product_type: Some(ProductType::Latte),
        });
        let prompt = render_system_prompt(&[], None, None, &eligibility);
        assert!(prompt.contains("20-25%"));
        assert!(prompt.contains("Latte"));
    }

    #[test]
    fn test_single_value_range() {
        let eligibility = Eligibility::Offer(Offer {
            reason: OfferReason::NewCustomer,
            percent_min: 15,
            percent_max: 15,
            product_type: None,
        });
        let prompt = render_system_prompt(&[], None, None, &eligibility);
        assert!(prompt.contains("15%"));
        assert!(!prompt.contains("15-15%"));
    }
}

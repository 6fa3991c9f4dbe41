//! Discount codes and the product types they can be scoped to.
//!
//! Codes are tracked client-side only: the backend surfaces a structured
//! discount when the barista mentions one, but does not validate or persist
//! issued codes (see the active-code list supplied by the caller).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A drink category a discount can be scoped to.
///
/// The variants form a fixed keyword set; matching is case-insensitive
/// substring search so "iced oat latte" scopes to [`ProductType::Latte`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    Latte,
    #[serde(rename = "Cold Brew")]
    ColdBrew,
    Espresso,
    Tea,
    Mocha,
    Cappuccino,
    Americano,
    Macchiato,
}

impl ProductType {
    /// All known product types, in match-priority order.
    pub const ALL: [Self; 8] = [
        Self::Latte,
        Self::ColdBrew,
        Self::Espresso,
        Self::Tea,
        Self::Mocha,
        Self::Cappuccino,
        Self::Americano,
        Self::Macchiato,
    ];

    /// Display keyword for this product type.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Latte => "Latte",
            Self::ColdBrew => "Cold Brew",
            Self::Espresso => "Espresso",
            Self::Tea => "Tea",
            Self::Mocha => "Mocha",
            Self::Cappuccino => "Cappuccino",
            Self::Americano => "Americano",
            Self::Macchiato => "Macchiato",
        }
    }

    /// Find the first product-type keyword mentioned in free text.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|pt| lower.contains(&pt.keyword().to_lowercase()))
    }

    /// Find a product type embedded in a discount code such as `LATTE15`
    /// or `COLDBREW20` (keyword spaces are dropped in codes).
    #[must_use]
    pub fn detect_in_code(code: &str) -> Option<Self> {
        let lower = code.to_lowercase();
        Self::ALL.into_iter().find(|pt| {
            let compact = pt.keyword().to_lowercase().replace(' ', "");
            lower.contains(&compact)
        })
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A client-tracked discount code with percentage, expiry, and optional
/// product scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// The code itself, e.g. `LATTE15`.
    pub code: String,
    /// Percentage off, in whole percent.
    pub percentage: u8,
    /// When the code stops being honored.
    pub expiry: DateTime<Utc>,
    /// Drink category the code is limited to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_in_plain_text() {
        assert_eq!(ProductType::detect("I'd love a latte"), Some(ProductType::Latte));
        assert_eq!(
            ProductType::detect("any cold brew deals?"),
            Some(ProductType::ColdBrew)
        );
        assert_eq!(ProductType::detect("just water thanks"), None);
    }

    #[test]
    fn test_detect_in_item_name() {
        assert_eq!(
            ProductType::detect("Iced Caramel Macchiato"),
            Some(ProductType::Macchiato)
        );
        assert_eq!(ProductType::detect("Matcha Green Tea"), Some(ProductType::Tea));
    }

    #[test]
    fn test_detect_priority_order() {
        // Latte wins over Mocha because it comes first in the keyword set
        assert_eq!(ProductType::detect("mocha latte"), Some(ProductType::Latte));
    }

    #[test]
    fn test_detect_in_code() {
        assert_eq!(ProductType::detect_in_code("LATTE15"), Some(ProductType::Latte));
        assert_eq!(
            ProductType::detect_in_code("COLDBREW20"),
            Some(ProductType::ColdBrew)
        );
        assert_eq!(ProductType::detect_in_code("WELCOME10"), None);
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&ProductType::ColdBrew).unwrap();
        assert_eq!(json, "\"Cold Brew\"");
        let back: ProductType = serde_json::from_str("\"Latte\"").unwrap();
        assert_eq!(back, ProductType::Latte);
    }

    #[test]
    fn test_discount_code_serde_shape() {
        let code = DiscountCode {
            code: "LATTE15".to_string(),
            percentage: 15,
            expiry: "2026-09-06T00:00:00Z".parse().unwrap(),
            product_type: Some(ProductType::Latte),
        };
        let json = serde_json::to_value(&code).unwrap();
        assert_eq!(json["code"], "LATTE15");
        assert_eq!(json["percentage"], 15);
        assert_eq!(json["productType"], "Latte");
    }

    #[test]
    fn test_discount_code_omits_missing_scope() {
        let code = DiscountCode {
            code: "WELCOME10".to_string(),
            percentage: 10,
            expiry: "2026-09-06T00:00:00Z".parse().unwrap(),
            product_type: None,
        };
        let json = serde_json::to_value(&code).unwrap();
        assert!(json.get("productType").is_none());
    }
}

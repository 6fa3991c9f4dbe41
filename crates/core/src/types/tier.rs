//! Loyalty tier ladder.
//!
//! Tiers are keyed by lifetime points so redeeming points never demotes a
//! customer. Thresholds: Bronze 0, Silver 200, Gold 500, Platinum 1000.

use serde::{Deserialize, Serialize};

/// A named loyalty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Lifetime points required to reach this tier.
    #[must_use]
    pub const fn threshold(self) -> i64 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 200,
            Self::Gold => 500,
            Self::Platinum => 1000,
        }
    }

    /// The tier a customer with `lifetime_points` currently holds.
    #[must_use]
    pub const fn for_points(lifetime_points: i64) -> Self {
        if lifetime_points >= Self::Platinum.threshold() {
            Self::Platinum
        } else if lifetime_points >= Self::Gold.threshold() {
            Self::Gold
        } else if lifetime_points >= Self::Silver.threshold() {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// The next tier up, or `None` at Platinum.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => Some(Self::Platinum),
            Self::Platinum => None,
        }
    }

    /// Points still needed to reach the next tier, or `None` at Platinum.
    #[must_use]
    pub fn points_to_next(lifetime_points: i64) -> Option<i64> {
        Self::for_points(lifetime_points)
            .next()
            .map(|next| (next.threshold() - lifetime_points).max(0))
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bronze => write!(f, "Bronze"),
            Self::Silver => write!(f, "Silver"),
            Self::Gold => write!(f, "Gold"),
            Self::Platinum => write!(f, "Platinum"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_for_points() {
        assert_eq!(Tier::for_points(0), Tier::Bronze);
        assert_eq!(Tier::for_points(199), Tier::Bronze);
        assert_eq!(Tier::for_points(200), Tier::Silver);
        assert_eq!(Tier::for_points(499), Tier::Silver);
        assert_eq!(Tier::for_points(500), Tier::Gold);
        assert_eq!(Tier::for_points(999), Tier::Gold);
        assert_eq!(Tier::for_points(1000), Tier::Platinum);
        assert_eq!(Tier::for_points(50_000), Tier::Platinum);
    }

    #[test]
    fn test_points_to_next() {
        assert_eq!(Tier::points_to_next(0), Some(200));
        assert_eq!(Tier::points_to_next(150), Some(50));
        assert_eq!(Tier::points_to_next(200), Some(300));
        assert_eq!(Tier::points_to_next(1000), None);
    }

    #[test]
    fn test_next() {
        assert_eq!(Tier::Bronze.next(), Some(Tier::Silver));
        assert_eq!(Tier::Platinum.next(), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Tier::Gold).unwrap();
        assert_eq!(json, "\"gold\"");
        let back: Tier = serde_json::from_str("\"platinum\"").unwrap();
        assert_eq!(back, Tier::Platinum);
    }

    #[test]
    fn test_ordering() {
        assert!(Tier::Bronze < Tier::Silver);
        assert!(Tier::Gold < Tier::Platinum);
    }
}

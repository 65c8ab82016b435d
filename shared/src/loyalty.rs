//! Loyalty tier table
//!
//! Tiers are brackets over a customer's *current* point balance (not
//! lifetime earned). Each tier carries an earn multiplier applied when
//! points are awarded; the tier is always evaluated before the new points
//! are added.

use serde::{Deserialize, Serialize};

/// Points earned per 1.00 currency unit spent (before tier bonus).
pub const POINTS_PER_CURRENCY: f64 = 1.0;

/// Currency value of one redeemed point.
pub const REDEMPTION_VALUE_PER_POINT: f64 = 0.01;

const SILVER_THRESHOLD: i64 = 500;
const GOLD_THRESHOLD: i64 = 1_500;
const PLATINUM_THRESHOLD: i64 = 5_000;

/// Loyalty tier bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyTier {
    /// Tier for a given point balance.
    pub fn for_points(points: i64) -> Self {
        if points >= PLATINUM_THRESHOLD {
            LoyaltyTier::Platinum
        } else if points >= GOLD_THRESHOLD {
            LoyaltyTier::Gold
        } else if points >= SILVER_THRESHOLD {
            LoyaltyTier::Silver
        } else {
            LoyaltyTier::Bronze
        }
    }

    /// Earn multiplier for this tier.
    pub fn multiplier(self) -> f64 {
        match self {
            LoyaltyTier::Bronze => 1.0,
            LoyaltyTier::Silver => 1.25,
            LoyaltyTier::Gold => 1.5,
            LoyaltyTier::Platinum => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "bronze",
            LoyaltyTier::Silver => "silver",
            LoyaltyTier::Gold => "gold",
            LoyaltyTier::Platinum => "platinum",
        }
    }
}

/// Point balance required for the next tier, `None` at platinum.
pub fn next_tier_threshold(points: i64) -> Option<i64> {
    if points < SILVER_THRESHOLD {
        Some(SILVER_THRESHOLD)
    } else if points < GOLD_THRESHOLD {
        Some(GOLD_THRESHOLD)
    } else if points < PLATINUM_THRESHOLD {
        Some(PLATINUM_THRESHOLD)
    } else {
        None
    }
}

/// Points still needed to reach the next tier, 0 at platinum.
pub fn points_to_next_tier(points: i64) -> i64 {
    next_tier_threshold(points).map_or(0, |t| t - points)
}

/// Points earned for a spend amount at the tier held *before* accrual.
///
/// Base points and the tier bonus are rounded independently, matching the
/// ledger's historical behaviour.
pub fn earned_points(final_amount: f64, tier: LoyaltyTier) -> i64 {
    let base = (final_amount * POINTS_PER_CURRENCY).round() as i64;
    (base as f64 * tier.multiplier()).round() as i64
}

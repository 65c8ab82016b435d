//! Customer models

use serde::{Deserialize, Serialize};

use crate::loyalty::{self, LoyaltyTier};

/// Customer entity
///
/// Loyalty fields move only through the loyalty ledger; `total_orders` and
/// `total_spent` are written in the same transaction as the point credit
/// they belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub loyalty_points: i64,
    pub total_orders: i64,
    pub total_spent: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Optional initial balance (imports from a previous program)
    pub loyalty_points: Option<i64>,
}

/// Customer detail with derived loyalty fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(flatten)]
    pub customer: Customer,
    pub loyalty_tier: LoyaltyTier,
    pub next_tier_threshold: Option<i64>,
    pub points_to_next_tier: i64,
}

impl From<Customer> for CustomerProfile {
    fn from(customer: Customer) -> Self {
        let points = customer.loyalty_points;
        CustomerProfile {
            customer,
            loyalty_tier: LoyaltyTier::for_points(points),
            next_tier_threshold: loyalty::next_tier_threshold(points),
            points_to_next_tier: loyalty::points_to_next_tier(points),
        }
    }
}

/// Manual point adjustment payload (signed delta, balance floors at zero)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyAdjustRequest {
    pub points: i64,
}

/// Redeem points against an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemPointsRequest {
    pub points: i64,
}

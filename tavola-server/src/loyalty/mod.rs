//! Loyalty point ledger
//!
//! Accrual is at-most-once per order and may be triggered by either the
//! payment-completion path or an explicit completion; both funnel through
//! [`grant_once`], which settles the race with the order's `loyalty_accrued`
//! flag claim. Redemption converts points into an order discount at a fixed
//! rate and debits the balance in the same transaction.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use shared::loyalty::{earned_points, LoyaltyTier, REDEMPTION_VALUE_PER_POINT};
use shared::models::RedeemPointsRequest;
use shared::util::now_millis;

use crate::db::repository::{customer, order};
use crate::db::DbService;
use crate::orders::money;
use crate::utils::{AppError, AppResult};

/// Outcome of a successful point accrual.
#[derive(Debug, Clone, Serialize)]
pub struct LoyaltyGrant {
    pub customer_id: i64,
    pub points_earned: i64,
    /// Tier held at accrual time (evaluated before the new points land)
    pub tier: LoyaltyTier,
    pub new_balance: i64,
}

/// Outcome of a point redemption against an order.
#[derive(Debug, Clone, Serialize)]
pub struct RedeemOutcome {
    pub order_id: i64,
    pub points_redeemed: i64,
    pub discount_amount: f64,
    pub final_amount: f64,
    pub remaining_points: i64,
}

/// Grant loyalty points for an order exactly once.
///
/// Returns `Ok(None)` when the order has no customer or points were
/// already granted through the other trigger path. The tier multiplier is
/// taken from the balance *before* this grant. The customer's order count
/// and spend totals fold in atomically with the point credit.
pub async fn grant_once(db: &DbService, order_id: i64) -> AppResult<Option<LoyaltyGrant>> {
    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    let order = order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

    let Some(customer_id) = order.customer_id else {
        return Ok(None);
    };
    if !order::claim_loyalty_accrual(&mut *tx, order_id).await? {
        return Ok(None);
    }

    let cust = customer::find_by_id(&mut *tx, customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {customer_id} not found")))?;

    let tier = LoyaltyTier::for_points(cust.loyalty_points);
    let earned = earned_points(order.final_amount, tier);
    customer::accrue(&mut *tx, customer_id, earned, order.final_amount, now).await?;
    tx.commit().await?;

    info!(
        order_id,
        customer_id,
        points = earned,
        tier = tier.as_str(),
        "loyalty points granted"
    );
    Ok(Some(LoyaltyGrant {
        customer_id,
        points_earned: earned,
        tier,
        new_balance: cust.loyalty_points + earned,
    }))
}

/// Redeem points against an open order, lowering its final amount.
///
/// The debit and the order rewrite share one transaction; the balance
/// guard lives in the UPDATE, so concurrent redemptions cannot overdraw.
pub async fn redeem(
    db: &DbService,
    order_id: i64,
    req: &RedeemPointsRequest,
) -> AppResult<RedeemOutcome> {
    if req.points <= 0 {
        return Err(AppError::validation(
            "Points to redeem must be positive".to_string(),
        ));
    }

    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    let order = order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
    if order.status.is_terminal() {
        return Err(AppError::validation(format!(
            "Cannot redeem points on a {} order",
            order.status.as_str()
        )));
    }
    let customer_id = order
        .customer_id
        .ok_or_else(|| AppError::validation("Order has no customer attached".to_string()))?;

    // A missing customer row is not-found, not a balance failure
    let cust = customer::find_by_id(&mut *tx, customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {customer_id} not found")))?;
    if !customer::redeem_points(&mut *tx, customer_id, req.points, now).await? {
        return Err(AppError::insufficient(
            "Insufficient loyalty points".to_string(),
        ));
    }

    let redeemed_value =
        money::round2(Decimal::from(req.points) * money::to_decimal(REDEMPTION_VALUE_PER_POINT));
    let new_discount = money::round2(money::to_decimal(order.discount_amount) + redeemed_value);
    let new_final = money::final_amount(
        money::to_decimal(order.total_amount),
        money::to_decimal(order.tax_amount),
        new_discount,
    );
    order::set_discount(
        &mut *tx,
        order_id,
        money::to_f64(new_discount),
        money::to_f64(new_final),
    )
    .await?;

    tx.commit().await?;

    info!(
        order_id,
        customer_id,
        points = req.points,
        discount = money::to_f64(redeemed_value),
        "loyalty points redeemed"
    );
    Ok(RedeemOutcome {
        order_id,
        points_redeemed: req.points,
        discount_amount: money::to_f64(new_discount),
        final_amount: money::to_f64(new_final),
        remaining_points: cust.loyalty_points - req.points,
    })
}

/// Manual point adjustment (support/correction path). Negative deltas
/// floor the balance at zero.
pub async fn adjust(db: &DbService, customer_id: i64, delta: i64) -> AppResult<i64> {
    if delta == 0 {
        return Err(AppError::validation(
            "Adjustment delta must be non-zero".to_string(),
        ));
    }
    let now = now_millis();
    let mut tx = db.pool.begin().await?;
    customer::adjust_points(&mut *tx, customer_id, delta, now).await?;
    let cust = customer::find_by_id(&mut *tx, customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {customer_id} not found")))?;
    tx.commit().await?;
    Ok(cust.loyalty_points)
}

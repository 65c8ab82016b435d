//! Payment ledger
//!
//! Payments are append-only and are the financial ground truth: the
//! payment row commits before any downstream reaction runs. Reaching the
//! order's final amount (within the money tolerance) flips a pending
//! order to confirmed in the same transaction and triggers the loyalty
//! grant afterwards.

use serde_json::json;
use tracing::{info, warn};

use shared::models::{Order, OrderStatus, Payment, PaymentCreate, PaymentReceipt, PaymentStatus};
use shared::util::{now_millis, snowflake_id};
use shared::KitchenEventType;

use crate::db::repository::{order, payment};
use crate::db::DbService;
use crate::kitchen::KitchenFeed;
use crate::loyalty;
use crate::orders::money;
use crate::utils::{AppError, AppResult};

/// Record a completed payment against an open order.
///
/// Overpayment is accepted and kept in the ledger as-is. When the running
/// paid total covers `final_amount` the order is confirmed (if still
/// pending) and loyalty accrues at most once; a fully paid order with a
/// zero final amount accrues zero points through the same path.
pub async fn record_payment(
    db: &DbService,
    feed: &KitchenFeed,
    order_id: i64,
    req: &PaymentCreate,
) -> AppResult<PaymentReceipt> {
    money::require_positive_amount(req.amount, "Payment amount")?;
    if req.method.trim().is_empty() {
        return Err(AppError::validation(
            "Payment method is required".to_string(),
        ));
    }

    let now = now_millis();
    let mut tx = db.pool.begin().await?;

    let target = order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
    if target.status.is_terminal() {
        return Err(AppError::validation(format!(
            "Cannot record a payment against a {} order",
            target.status.as_str()
        )));
    }

    let record = Payment {
        id: snowflake_id(),
        order_id,
        amount: money::to_f64(money::round2(money::to_decimal(req.amount))),
        method: req.method.trim().to_string(),
        status: PaymentStatus::Completed,
        transaction_id: req.transaction_id.clone(),
        created_at: now,
    };
    payment::insert(&mut *tx, &record).await?;

    let total_paid = payment::total_paid(&mut *tx, order_id).await?;
    let fully_paid = money::to_decimal(total_paid)
        >= money::to_decimal(target.final_amount) - money::MONEY_TOLERANCE;

    let mut new_status = target.status;
    if fully_paid && target.status == OrderStatus::Pending {
        new_status = OrderStatus::Confirmed;
        order::set_status(&mut *tx, order_id, new_status, None).await?;
    }
    tx.commit().await?;

    if fully_paid {
        // The payment is already durable; a failed grant stays retryable
        // through the unclaimed accrual flag.
        if let Err(err) = loyalty::grant_once(db, order_id).await {
            warn!(order_id, error = %err, "loyalty accrual failed after payment");
        }
    }
    if new_status != target.status {
        feed.publish(
            KitchenEventType::OrderStatus,
            json!({
                "order_id": order_id,
                "status": new_status.as_str(),
                "previous": target.status.as_str(),
            }),
        );
    }

    info!(
        order_id,
        payment_id = record.id,
        amount = record.amount,
        total_paid,
        fully_paid,
        "payment recorded"
    );
    Ok(PaymentReceipt {
        payment_id: record.id,
        total_paid,
        order_status: new_status,
    })
}

/// Payments recorded against an order, oldest first.
pub async fn list_for_order(db: &DbService, order_id: i64) -> AppResult<Vec<Payment>> {
    order_must_exist(db, order_id).await?;
    Ok(payment::list_by_order(db.pool(), order_id).await?)
}

async fn order_must_exist(db: &DbService, order_id: i64) -> AppResult<Order> {
    order::find_by_id(db.pool(), order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))
}

//! Payment Repository
//!
//! Append-only payment rows. Only `completed` payments count toward an
//! order's paid total.

use super::RepoResult;
use shared::models::{Payment, PaymentStatus};
use sqlx::SqliteExecutor;

pub async fn insert(ex: impl SqliteExecutor<'_>, payment: &Payment) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO payment (id, order_id, amount, method, status, transaction_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(payment.id)
    .bind(payment.order_id)
    .bind(payment.amount)
    .bind(&payment.method)
    .bind(payment.status)
    .bind(&payment.transaction_id)
    .bind(payment.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn list_by_order(ex: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<Vec<Payment>> {
    let rows = sqlx::query_as::<_, Payment>(
        "SELECT id, order_id, amount, method, status, transaction_id, created_at FROM payment WHERE order_id = ? ORDER BY created_at ASC, id ASC",
    )
    .bind(order_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Sum of completed payments against an order.
pub async fn total_paid(ex: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<f64> {
    let total: Option<f64> = sqlx::query_scalar(
        "SELECT SUM(amount) FROM payment WHERE order_id = ? AND status = ?",
    )
    .bind(order_id)
    .bind(PaymentStatus::Completed)
    .fetch_one(ex)
    .await?;
    Ok(total.unwrap_or(0.0))
}

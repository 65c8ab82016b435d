//! Customer Repository
//!
//! Loyalty balance mutations live here so every write is a single atomic
//! statement; the loyalty service decides when they run and inside which
//! transaction.

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerCreate};
use sqlx::SqliteExecutor;

const CUSTOMER_SELECT: &str = "SELECT id, name, phone, email, loyalty_points, total_orders, total_spent, created_at, updated_at FROM customer";

pub async fn find_all(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(ex).await?;
    Ok(rows)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    data: &CustomerCreate,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO customer (id, name, phone, email, loyalty_points, total_orders, total_spent, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(data.loyalty_points.unwrap_or(0).max(0))
    .bind(now)
    .execute(ex)
    .await?;
    Ok(())
}

/// Credit earned points and fold the completed order into the customer
/// totals. Runs inside the accrual transaction.
pub async fn accrue(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    points: i64,
    spent: f64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE customer SET loyalty_points = loyalty_points + ?1, total_orders = total_orders + 1, total_spent = total_spent + ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(points)
    .bind(spent)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    Ok(())
}

/// Debit redeemed points. The balance guard is part of the statement so a
/// concurrent redemption cannot drive the balance negative.
pub async fn redeem_points(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    points: i64,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE customer SET loyalty_points = loyalty_points - ?1, updated_at = ?2 WHERE id = ?3 AND loyalty_points >= ?1",
    )
    .bind(points)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Manual signed adjustment; the balance floors at zero.
pub async fn adjust_points(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    delta: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE customer SET loyalty_points = MAX(0, loyalty_points + ?1), updated_at = ?2 WHERE id = ?3",
    )
    .bind(delta)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    Ok(())
}

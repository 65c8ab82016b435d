//! Order Repository
//!
//! Orders and their items, plus the two idempotency flag claims. A claim
//! is an `UPDATE ... WHERE flag = 0`: zero rows affected means another
//! invocation already owns the side effect.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderItem, OrderItemStatus, OrderStatus};
use sqlx::SqliteExecutor;

const ORDER_SELECT: &str = "SELECT id, order_type, status, customer_id, table_id, notes, total_amount, tax_amount, discount_amount, final_amount, inventory_deducted, loyalty_accrued, created_at, completed_at FROM orders";

const ITEM_SELECT: &str = "SELECT id, order_id, menu_item_id, name, quantity, price, special_instructions, status FROM order_item";

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn find_all(
    ex: impl SqliteExecutor<'_>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} ORDER BY created_at DESC LIMIT ? OFFSET ?");
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

/// Orders the kitchen display cares about (non-terminal, oldest first)
pub async fn find_active(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{ORDER_SELECT} WHERE status IN ('pending', 'confirmed', 'cooking', 'ready') ORDER BY created_at ASC"
    );
    let rows = sqlx::query_as::<_, Order>(&sql).fetch_all(ex).await?;
    Ok(rows)
}

pub async fn insert(ex: impl SqliteExecutor<'_>, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_type, status, customer_id, table_id, notes, total_amount, tax_amount, discount_amount, final_amount, inventory_deducted, loyalty_accrued, created_at, completed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
    )
    .bind(order.id)
    .bind(order.order_type)
    .bind(order.status)
    .bind(order.customer_id)
    .bind(order.table_id)
    .bind(&order.notes)
    .bind(order.total_amount)
    .bind(order.tax_amount)
    .bind(order.discount_amount)
    .bind(order.final_amount)
    .bind(order.inventory_deducted)
    .bind(order.loyalty_accrued)
    .bind(order.created_at)
    .bind(order.completed_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn insert_item(ex: impl SqliteExecutor<'_>, item: &OrderItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_item (id, order_id, menu_item_id, name, quantity, price, special_instructions, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.menu_item_id)
    .bind(&item.name)
    .bind(item.quantity)
    .bind(item.price)
    .bind(&item.special_instructions)
    .bind(item.status)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn list_items(ex: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

pub async fn find_item(ex: impl SqliteExecutor<'_>, item_id: i64) -> RepoResult<Option<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(item_id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn set_status(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    status: OrderStatus,
    completed_at: Option<i64>,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, completed_at = COALESCE(?2, completed_at) WHERE id = ?3",
    )
    .bind(status)
    .bind(completed_at)
    .bind(id)
    .execute(ex)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

pub async fn set_item_status(
    ex: impl SqliteExecutor<'_>,
    item_id: i64,
    status: OrderItemStatus,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE order_item SET status = ? WHERE id = ?")
        .bind(status)
        .bind(item_id)
        .execute(ex)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order item {item_id} not found")));
    }
    Ok(())
}

/// Rewrite the discount and derived final amount (loyalty redemption path).
pub async fn set_discount(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    discount_amount: f64,
    final_amount: f64,
) -> RepoResult<()> {
    let rows =
        sqlx::query("UPDATE orders SET discount_amount = ?1, final_amount = ?2 WHERE id = ?3")
            .bind(discount_amount)
            .bind(final_amount)
            .bind(id)
            .execute(ex)
            .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

/// Claim the per-order inventory deduction. Returns false when a previous
/// invocation already deducted for this order.
pub async fn claim_inventory_deduction(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE orders SET inventory_deducted = 1 WHERE id = ? AND inventory_deducted = 0",
    )
    .bind(id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Claim the per-order loyalty accrual. Returns false when points were
/// already granted (by either trigger path) or the order has no customer.
pub async fn claim_loyalty_accrual(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE orders SET loyalty_accrued = 1 WHERE id = ? AND loyalty_accrued = 0 AND customer_id IS NOT NULL",
    )
    .bind(id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected() > 0)
}

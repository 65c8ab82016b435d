//! Ingredient Repository
//!
//! Stock rows plus the append-only inventory ledger. Ledger rows are only
//! ever inserted; the single delete path is the administrative ingredient
//! deletion, which cascades.

use super::{RepoError, RepoResult};
use shared::models::{
    Ingredient, IngredientCreate, IngredientUpdate, InventoryTransactionView, TransactionType,
};
use sqlx::SqliteExecutor;

const INGREDIENT_SELECT: &str = "SELECT id, name, unit, current_stock, min_stock, cost_per_unit, over_consumed, created_at, updated_at FROM ingredient";

pub async fn find_all(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<Ingredient>> {
    let sql = format!("{INGREDIENT_SELECT} ORDER BY name");
    let rows = sqlx::query_as::<_, Ingredient>(&sql).fetch_all(ex).await?;
    Ok(rows)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Ingredient>> {
    let sql = format!("{INGREDIENT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Ingredient>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

/// Ingredients at or below their minimum stock level
pub async fn find_low_stock(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<Ingredient>> {
    let sql = format!("{INGREDIENT_SELECT} WHERE current_stock <= min_stock ORDER BY name");
    let rows = sqlx::query_as::<_, Ingredient>(&sql).fetch_all(ex).await?;
    Ok(rows)
}

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    data: &IngredientCreate,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO ingredient (id, name, unit, current_stock, min_stock, cost_per_unit, over_consumed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.unit)
    .bind(data.current_stock.unwrap_or(0.0))
    .bind(data.min_stock.unwrap_or(0.0))
    .bind(data.cost_per_unit)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn update(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    data: &IngredientUpdate,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE ingredient SET name = COALESCE(?1, name), unit = COALESCE(?2, unit), min_stock = COALESCE(?3, min_stock), cost_per_unit = COALESCE(?4, cost_per_unit), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.unit)
    .bind(data.min_stock)
    .bind(data.cost_per_unit)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Ingredient {id} not found")));
    }
    Ok(())
}

/// Administrative deletion; ledger rows cascade with the ingredient.
pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM ingredient WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Write a new stock level, optionally toggling the over-consumed marker.
///
/// Callers compute the level inside the same transaction that read it.
pub async fn set_stock(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    new_stock: f64,
    over_consumed: Option<bool>,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE ingredient SET current_stock = ?1, over_consumed = COALESCE(?2, over_consumed), updated_at = ?3 WHERE id = ?4",
    )
    .bind(new_stock)
    .bind(over_consumed)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Ingredient {id} not found")));
    }
    Ok(())
}

// ========== Inventory ledger ==========

#[allow(clippy::too_many_arguments)]
pub async fn insert_transaction(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    ingredient_id: i64,
    transaction_type: TransactionType,
    quantity: f64,
    related_order_id: Option<i64>,
    notes: Option<&str>,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO inventory_transaction (id, ingredient_id, transaction_type, quantity, related_order_id, notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(ingredient_id)
    .bind(transaction_type)
    .bind(quantity)
    .bind(related_order_id)
    .bind(notes)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(())
}

const TRANSACTION_VIEW_SELECT: &str = "SELECT t.id, t.ingredient_id, i.name AS ingredient_name, t.transaction_type, t.quantity, i.cost_per_unit, t.related_order_id, t.notes, t.created_at FROM inventory_transaction t JOIN ingredient i ON t.ingredient_id = i.id";

pub async fn list_transactions(
    ex: impl SqliteExecutor<'_>,
) -> RepoResult<Vec<InventoryTransactionView>> {
    let sql = format!("{TRANSACTION_VIEW_SELECT} ORDER BY t.created_at DESC, t.id DESC");
    let rows = sqlx::query_as::<_, InventoryTransactionView>(&sql)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

pub async fn list_transactions_by_type(
    ex: impl SqliteExecutor<'_>,
    transaction_type: TransactionType,
) -> RepoResult<Vec<InventoryTransactionView>> {
    let sql =
        format!("{TRANSACTION_VIEW_SELECT} WHERE t.transaction_type = ? ORDER BY t.created_at DESC, t.id DESC");
    let rows = sqlx::query_as::<_, InventoryTransactionView>(&sql)
        .bind(transaction_type)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

pub async fn list_transactions_for_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> RepoResult<Vec<InventoryTransactionView>> {
    let sql = format!("{TRANSACTION_VIEW_SELECT} WHERE t.related_order_id = ? ORDER BY t.id");
    let rows = sqlx::query_as::<_, InventoryTransactionView>(&sql)
        .bind(order_id)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

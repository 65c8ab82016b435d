//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use sqlx::SqliteExecutor;

const TABLE_SELECT: &str = "SELECT id, table_number, capacity, status FROM dining_table";

pub async fn find_all(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} ORDER BY table_number");
    let rows = sqlx::query_as::<_, DiningTable>(&sql).fetch_all(ex).await?;
    Ok(rows)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    data: &DiningTableCreate,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO dining_table (id, table_number, capacity, status) VALUES (?1, ?2, ?3, 'available')",
    )
    .bind(id)
    .bind(&data.table_number)
    .bind(data.capacity.unwrap_or(4))
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn update(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    data: &DiningTableUpdate,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE dining_table SET table_number = COALESCE(?1, table_number), capacity = COALESCE(?2, capacity), status = COALESCE(?3, status) WHERE id = ?4",
    )
    .bind(&data.table_number)
    .bind(data.capacity)
    .bind(data.status)
    .bind(id)
    .execute(ex)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    Ok(())
}

pub async fn set_status(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    status: TableStatus,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE dining_table SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(ex)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    Ok(())
}

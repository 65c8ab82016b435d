//! Menu Item Repository

use super::RepoResult;
use shared::models::MenuItem;
use sqlx::SqliteExecutor;

const MENU_ITEM_SELECT: &str = "SELECT id, name, description, category, price, preparation_time, is_available, created_at FROM menu_item";

pub async fn find_all(ex: impl SqliteExecutor<'_>) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} ORDER BY category, name");
    let rows = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(ex).await?;
    Ok(rows)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

/// Menu management path (used by seeding and tests).
pub async fn insert(ex: impl SqliteExecutor<'_>, item: &MenuItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO menu_item (id, name, description, category, price, preparation_time, is_available, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(item.id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(&item.category)
    .bind(item.price)
    .bind(item.preparation_time)
    .bind(item.is_available)
    .bind(item.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

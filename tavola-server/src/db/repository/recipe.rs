//! Recipe Repository
//!
//! Menu item to ingredient requirements. Owned by menu management; the
//! bookkeeping core only reads these rows.

use super::RepoResult;
use shared::models::{RecipeLine, RecipeLineView};
use sqlx::SqliteExecutor;

pub async fn for_menu_item(
    ex: impl SqliteExecutor<'_>,
    menu_item_id: i64,
) -> RepoResult<Vec<RecipeLine>> {
    let rows = sqlx::query_as::<_, RecipeLine>(
        "SELECT menu_item_id, ingredient_id, quantity_required FROM recipe WHERE menu_item_id = ?",
    )
    .bind(menu_item_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn for_menu_item_view(
    ex: impl SqliteExecutor<'_>,
    menu_item_id: i64,
) -> RepoResult<Vec<RecipeLineView>> {
    let rows = sqlx::query_as::<_, RecipeLineView>(
        "SELECT r.ingredient_id, i.name AS ingredient_name, i.unit, r.quantity_required FROM recipe r JOIN ingredient i ON r.ingredient_id = i.id WHERE r.menu_item_id = ? ORDER BY i.name",
    )
    .bind(menu_item_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Replace a menu item's recipe (menu management path, used by seeding and tests)
pub async fn set_line(
    ex: impl SqliteExecutor<'_>,
    menu_item_id: i64,
    ingredient_id: i64,
    quantity_required: f64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO recipe (menu_item_id, ingredient_id, quantity_required) VALUES (?1, ?2, ?3) ON CONFLICT (menu_item_id, ingredient_id) DO UPDATE SET quantity_required = excluded.quantity_required",
    )
    .bind(menu_item_id)
    .bind(ingredient_id)
    .bind(quantity_required)
    .execute(ex)
    .await?;
    Ok(())
}

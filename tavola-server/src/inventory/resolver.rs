//! Recipe resolver
//!
//! Computes whether current stock covers a menu item's recipe. Pure read;
//! an item with no recipe rows has no inventory gate and is always
//! fulfillable.

use sqlx::SqlitePool;

use shared::models::MissingIngredient;

use crate::utils::AppResult;

/// Fulfillability of one menu item at a requested serving count.
#[derive(Debug, Clone)]
pub struct Availability {
    pub fulfillable: bool,
    pub missing: Vec<MissingIngredient>,
}

#[derive(Debug, sqlx::FromRow)]
struct RequirementRow {
    ingredient_id: i64,
    name: String,
    quantity_required: f64,
    current_stock: f64,
}

/// Check every recipe ingredient of `menu_item_id` against current stock
/// for `servings` units, reporting each shortfall.
pub async fn can_fulfill(
    pool: &SqlitePool,
    menu_item_id: i64,
    servings: i64,
) -> AppResult<Availability> {
    let requirements = sqlx::query_as::<_, RequirementRow>(
        "SELECT r.ingredient_id, i.name, r.quantity_required, i.current_stock FROM recipe r JOIN ingredient i ON r.ingredient_id = i.id WHERE r.menu_item_id = ?",
    )
    .bind(menu_item_id)
    .fetch_all(pool)
    .await?;

    let mut missing = Vec::new();
    for req in requirements {
        let needed = req.quantity_required * servings as f64;
        if req.current_stock < needed {
            missing.push(MissingIngredient {
                ingredient_id: req.ingredient_id,
                name: req.name,
                required: needed,
                available: req.current_stock,
            });
        }
    }

    Ok(Availability {
        fulfillable: missing.is_empty(),
        missing,
    })
}

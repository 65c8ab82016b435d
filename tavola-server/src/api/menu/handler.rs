//! Menu API Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use shared::models::{MenuItemAvailability, RecipeLineView};

use crate::core::ServerState;
use crate::db::repository::{menu_item, recipe};
use crate::inventory;
use crate::utils::{AppError, AppResult};

/// GET /api/menu
///
/// Menu listing with effective availability: the manual flag gated by
/// whether stock covers one serving of the recipe.
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItemAvailability>>> {
    let items = menu_item::find_all(state.pool()).await?;
    let mut listing = Vec::with_capacity(items.len());
    for item in items {
        let availability = inventory::can_fulfill(state.pool(), item.id, 1).await?;
        listing.push(MenuItemAvailability {
            id: item.id,
            name: item.name,
            description: item.description,
            category: item.category,
            price: item.price,
            preparation_time: item.preparation_time,
            is_available: item.is_available && availability.fulfillable,
            inventory_available: availability.fulfillable,
            missing_ingredients: availability.missing,
        });
    }
    Ok(Json(listing))
}

/// GET /api/menu/{id}/recipe
pub async fn recipe(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<RecipeLineView>>> {
    menu_item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;
    let lines = recipe::for_menu_item_view(state.pool(), id).await?;
    Ok(Json(lines))
}

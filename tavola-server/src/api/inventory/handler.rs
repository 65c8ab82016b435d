//! Inventory API Handlers
//!
//! Stock levels only ever move through the ledger operations (restock,
//! wastage, spoil, adjust); the plain update endpoint edits metadata.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use shared::models::{
    AdjustStockRequest, Ingredient, IngredientCreate, IngredientUpdate, InventoryTransactionView,
    RestockRequest, SpoilRequest, TransactionType, WastageRequest,
};
use shared::util::{now_millis, snowflake_id};

use crate::core::ServerState;
use crate::db::repository::ingredient;
use crate::inventory;
use crate::utils::{AppError, AppResult};

/// GET /api/inventory
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = ingredient::find_all(state.pool()).await?;
    Ok(Json(ingredients))
}

/// POST /api/inventory
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<IngredientCreate>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Ingredient name is required"));
    }
    if payload.current_stock.is_some_and(|s| s < 0.0) {
        return Err(AppError::validation("Initial stock cannot be negative"));
    }
    let id = snowflake_id();
    ingredient::insert(state.pool(), id, &payload, now_millis()).await?;
    let created = ingredient::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::database("Ingredient vanished after creation"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/inventory/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<IngredientUpdate>,
) -> AppResult<Json<Ingredient>> {
    ingredient::update(state.pool(), id, &payload, now_millis()).await?;
    let updated = ingredient::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {id} not found")))?;
    Ok(Json(updated))
}

/// DELETE /api/inventory/{id}
///
/// Administrative removal; the ingredient's ledger history and recipe
/// lines cascade with it.
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !ingredient::delete(state.pool(), id).await? {
        return Err(AppError::not_found(format!("Ingredient {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/inventory/low-stock
pub async fn low_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = ingredient::find_low_stock(state.pool()).await?;
    Ok(Json(ingredients))
}

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub order_id: Option<i64>,
}

/// GET /api/inventory/transactions?type=usage&order_id=123
pub async fn transactions(
    State(state): State<ServerState>,
    Query(query): Query<TransactionsQuery>,
) -> AppResult<Json<Vec<InventoryTransactionView>>> {
    let rows = match (query.order_id, query.transaction_type) {
        (Some(order_id), _) => {
            ingredient::list_transactions_for_order(state.pool(), order_id).await?
        }
        (None, Some(t)) => ingredient::list_transactions_by_type(state.pool(), t).await?,
        (None, None) => ingredient::list_transactions(state.pool()).await?,
    };
    Ok(Json(rows))
}

/// POST /api/inventory/restock
pub async fn restock(
    State(state): State<ServerState>,
    Json(payload): Json<RestockRequest>,
) -> AppResult<Json<Ingredient>> {
    let updated = inventory::restock(&state.db, &payload).await?;
    Ok(Json(updated))
}

/// POST /api/inventory/wastage
pub async fn wastage(
    State(state): State<ServerState>,
    Json(payload): Json<WastageRequest>,
) -> AppResult<Json<Ingredient>> {
    let updated = inventory::record_waste(&state.db, &payload).await?;
    Ok(Json(updated))
}

/// GET /api/inventory/wastage
pub async fn waste_ledger(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<InventoryTransactionView>>> {
    let rows = ingredient::list_transactions_by_type(state.pool(), TransactionType::Waste).await?;
    Ok(Json(rows))
}

/// POST /api/inventory/{id}/spoil
pub async fn spoil(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SpoilRequest>,
) -> AppResult<Json<Ingredient>> {
    let updated = inventory::spoil(&state.db, id, &payload).await?;
    Ok(Json(updated))
}

/// POST /api/inventory/{id}/adjust
pub async fn adjust(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AdjustStockRequest>,
) -> AppResult<Json<Ingredient>> {
    let updated = inventory::adjust(&state.db, id, &payload).await?;
    Ok(Json(updated))
}

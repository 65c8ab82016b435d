//! Dining Table API Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::snowflake_id;

use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::{AppError, AppResult};

/// GET /api/tables
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(state.pool()).await?;
    Ok(Json(tables))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    if payload.table_number.trim().is_empty() {
        return Err(AppError::validation("Table number is required"));
    }
    let id = snowflake_id();
    dining_table::insert(state.pool(), id, &payload).await?;
    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::database("Table vanished after creation"))?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    dining_table::update(state.pool(), id, &payload).await?;
    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(Json(table))
}

//! Customer API Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared::models::{Customer, CustomerCreate, CustomerProfile, LoyaltyAdjustRequest};
use shared::util::{now_millis, snowflake_id};

use crate::core::ServerState;
use crate::db::repository::customer;
use crate::loyalty;
use crate::utils::{AppError, AppResult};

/// GET /api/customers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(state.pool()).await?;
    Ok(Json(customers))
}

/// POST /api/customers
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<(StatusCode, Json<CustomerProfile>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }
    let id = snowflake_id();
    customer::insert(state.pool(), id, &payload, now_millis()).await?;
    let created = customer::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::database("Customer vanished after creation"))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /api/customers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CustomerProfile>> {
    let found = customer::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))?;
    Ok(Json(found.into()))
}

/// POST /api/customers/{id}/loyalty - manual signed point adjustment
pub async fn adjust_loyalty(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LoyaltyAdjustRequest>,
) -> AppResult<Json<Value>> {
    let balance = loyalty::adjust(&state.db, id, payload.points).await?;
    Ok(Json(json!({
        "customer_id": id,
        "loyalty_points": balance,
    })))
}

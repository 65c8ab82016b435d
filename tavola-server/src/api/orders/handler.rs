//! Order API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use shared::models::{
    Order, OrderCreate, OrderDetail, OrderStatusUpdate, Payment, PaymentCreate, PaymentReceipt,
    RedeemPointsRequest,
};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::loyalty::{self, RedeemOutcome};
use crate::orders;
use crate::payments;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/orders?limit=50&offset=0 - newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 500);
    let offset = query.offset.unwrap_or(0).max(0);
    let rows = order::find_all(state.pool(), limit, offset).await?;
    Ok(Json(rows))
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderDetail>)> {
    let detail = orders::create_order(&state.db, &state.kitchen, &payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/orders/{id} - order with its items
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = orders::order_detail(&state.db, id).await?;
    Ok(Json(detail))
}

/// PATCH /api/orders/{id} - lifecycle transition
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let updated = orders::set_status(&state.db, &state.kitchen, id, payload.status).await?;
    Ok(Json(updated))
}

/// POST /api/orders/{id}/payments
pub async fn record_payment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<(StatusCode, Json<PaymentReceipt>)> {
    let receipt = payments::record_payment(&state.db, &state.kitchen, id, &payload).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /api/orders/{id}/payments
pub async fn list_payments(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Payment>>> {
    let rows = payments::list_for_order(&state.db, id).await?;
    Ok(Json(rows))
}

/// POST /api/orders/{id}/apply-loyalty - redeem points as a discount
pub async fn apply_loyalty(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RedeemPointsRequest>,
) -> AppResult<Json<RedeemOutcome>> {
    let outcome = loyalty::redeem(&state.db, id, &payload).await?;
    Ok(Json(outcome))
}

//! Inventory API module

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/low-stock", get(handler::low_stock))
        .route("/transactions", get(handler::transactions))
        .route("/restock", post(handler::restock))
        .route("/wastage", get(handler::waste_ledger).post(handler::wastage))
        .route("/{id}", put(handler::update).delete(handler::remove))
        .route("/{id}/spoil", post(handler::spoil))
        .route("/{id}/adjust", post(handler::adjust))
}

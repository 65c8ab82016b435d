//! Kitchen display API module

mod handler;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::active_orders))
        .route("/items/{id}", patch(handler::set_item_status))
        .route("/stream", get(handler::stream))
}

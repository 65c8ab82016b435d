//! Order API module

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).patch(handler::set_status))
        .route(
            "/{id}/payments",
            get(handler::list_payments).post(handler::record_payment),
        )
        .route("/{id}/apply-loyalty", post(handler::apply_loyalty))
}

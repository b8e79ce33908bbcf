//! Order API Module
//!
//! User-facing order placement and lifecycle. Admin status moves live under
//! `/api/admin/orders` in the admin module.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place_order))
        .route("/", get(handler::list_orders))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", put(handler::cancel_order))
        .route("/{id}/return", put(handler::return_order))
}

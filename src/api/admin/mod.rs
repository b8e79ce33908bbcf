//! Admin API Module
//!
//! User management, order management, and the sales report. Everything here
//! sits behind the admin middleware; catalog and coupon management live in
//! their resource modules under the same `/api/admin` prefix.

mod handler;

use axum::middleware;
use axum::{
    Router,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Admin router
pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/admin",
        routes().route_layer(middleware::from_fn(require_admin)),
    )
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/users", get(handler::list_users))
        .route("/users/{id}/block", put(handler::block_user))
        .route("/users/{id}/unblock", put(handler::unblock_user))
        .route("/orders", get(handler::list_orders))
        .route("/orders/{id}/status", put(handler::update_order_status))
        .route("/sales", get(handler::sales_report))
}

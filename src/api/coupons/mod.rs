//! Coupon API Module
//!
//! Users see the live coupons; CRUD sits under `/api/admin` behind the admin
//! middleware.

mod handler;

use axum::middleware;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Coupon router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/user/coupons", get(handler::list_active))
        .nest(
            "/api/admin/coupons",
            admin_routes().route_layer(middleware::from_fn(require_admin)),
        )
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all))
        .route("/", post(handler::create))
        .route("/{code}", put(handler::update))
        .route("/{code}", delete(handler::deactivate))
}

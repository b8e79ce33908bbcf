//! Category API Module
//!
//! Browsing is public; mutations sit under `/api/admin` behind the admin
//! middleware.

mod handler;

use axum::middleware;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Category router
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/categories", public_routes())
        .nest(
            "/api/admin/categories",
            admin_routes().route_layer(middleware::from_fn(require_admin)),
        )
}

fn public_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::delete))
}

//! Product API Module
//!
//! Browsing and reviews listing are public; mutations sit under `/api/admin`
//! behind the admin middleware.

mod handler;

use axum::middleware;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Product router
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/products", public_routes())
        .nest(
            "/api/admin/products",
            admin_routes().route_layer(middleware::from_fn(require_admin)),
        )
}

fn public_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/reviews", get(handler::list_reviews))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::delete))
}

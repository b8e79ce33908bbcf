//! Wishlist API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

/// Wishlist router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user/wishlist", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{product_id}", post(handler::add))
        .route("/{product_id}", delete(handler::remove))
}

//! Cart API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// Cart router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/items", post(handler::add_item))
        .route("/items/{product_id}", put(handler::update_item))
        .route("/items/{product_id}", delete(handler::remove_item))
}

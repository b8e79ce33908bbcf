//! User Profile API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// User profile and address router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/profile", get(handler::get_profile))
        .route("/profile", put(handler::update_profile))
        .route("/password", put(handler::change_password))
        .route("/addresses", get(handler::list_addresses))
        .route("/addresses", post(handler::add_address))
        .route("/addresses/{id}", put(handler::update_address))
        .route("/addresses/{id}", delete(handler::delete_address))
}

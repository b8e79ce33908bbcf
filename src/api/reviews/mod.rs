//! Review API Module
//!
//! Writing and deleting reviews requires login; reading lives under the
//! public product routes.

mod handler;

use axum::{
    Router,
    routing::{delete, post},
};

use crate::core::ServerState;

/// Review router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user/reviews", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::add_review))
        .route("/{product_id}", delete(handler::delete_review))
}

//! Payment API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Payment router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/create", post(handler::create_payment))
        .route("/verify", post(handler::verify_payment))
}

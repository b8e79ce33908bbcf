//! Wallet API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Wallet router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user/wallet", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_wallet))
        .route("/transactions", get(handler::list_transactions))
}

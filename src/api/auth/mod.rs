//! Auth API Module
//!
//! Signup with OTP verification, password login for users and admins, and
//! Google OAuth. All routes here are public; the auth middleware skips them.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Auth router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/verify-otp", post(handler::verify_otp))
        .route("/login", post(handler::login))
        .route("/admin/login", post(handler::admin_login))
        .route("/google/login", get(handler::google_login))
        .route("/google/callback", get(handler::google_callback))
}

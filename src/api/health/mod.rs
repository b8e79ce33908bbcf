//! Health API Module

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// Health router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - 健康检查 (含数据库连通性)
async fn health(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Value>>> {
    let db_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    Ok(ok(json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "database": db_ok,
    })))
}

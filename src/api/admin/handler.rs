//! Admin API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::api::Pagination;
use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus, SalesRow, UserProfile};
use crate::db::repository::{OrderRepository, UserRepository};
use crate::orders::OrdersManager;
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub days: Option<i32>,
}

/// GET /api/admin/users - 用户列表
pub async fn list_users(
    State(state): State<ServerState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<AppResponse<Vec<UserProfile>>>> {
    let (limit, offset) = pagination.limit_offset();
    let repo = UserRepository::new(state.pool.clone());
    let users = repo.list(limit, offset).await?;
    Ok(ok(users.into_iter().map(UserProfile::from).collect()))
}

/// PUT /api/admin/users/:id/block - 封禁用户
pub async fn block_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<UserProfile>>> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo.set_blocked(id, true).await?;
    tracing::info!(user_id = id, "User blocked");
    Ok(ok(user.into()))
}

/// PUT /api/admin/users/:id/unblock - 解封用户
pub async fn unblock_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<UserProfile>>> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo.set_blocked(id, false).await?;
    tracing::info!(user_id = id, "User unblocked");
    Ok(ok(user.into()))
}

/// GET /api/admin/orders - 全部订单
pub async fn list_orders(
    State(state): State<ServerState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let (limit, offset) = pagination.limit_offset();
    let repo = OrderRepository::new(state.pool.clone());
    Ok(ok(repo.list_all(limit, offset).await?))
}

/// PUT /api/admin/orders/:id/status - 推进订单状态 (发货/送达/取消/失败)
pub async fn update_order_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let manager = OrdersManager::new(state.pool.clone(), state.config.cod_limit);
    let order = manager.advance_status(id, req.status).await?;
    Ok(ok(order))
}

/// GET /api/admin/sales - 销售日报 (默认最近 7 天)
pub async fn sales_report(
    State(state): State<ServerState>,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<AppResponse<Vec<SalesRow>>>> {
    let days = query.days.unwrap_or(7).clamp(1, 365);
    let repo = OrderRepository::new(state.pool.clone());
    Ok(ok(repo.daily_sales(days).await?))
}

//! Order API Handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::Pagination;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderItem, OrderSummary};
use crate::db::repository::OrderRepository;
use crate::orders::{OrdersManager, PlaceOrderRequest};
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

fn manager(state: &ServerState) -> OrdersManager {
    OrdersManager::new(state.pool.clone(), state.config.cod_limit)
}

/// POST /api/user/orders - 从购物车下单
pub async fn place_order(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<Json<AppResponse<OrderSummary>>> {
    let summary = manager(&state).place_order(user.id, req).await?;
    Ok(ok(summary))
}

/// GET /api/user/orders - 我的订单列表
pub async fn list_orders(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let (limit, offset) = pagination.limit_offset();
    let repo = OrderRepository::new(state.pool.clone());
    Ok(ok(repo.list_by_user(user.id, limit, offset).await?))
}

/// GET /api/user/orders/:id - 订单详情 (含明细行)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let repo = OrderRepository::new(state.pool.clone());
    let order = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    if order.user_id != user.id && !user.is_admin() {
        return Err(AppError::forbidden(
            "order does not belong to this user".to_string(),
        ));
    }

    let items = repo.find_items(&state.pool, id).await?;
    Ok(ok(OrderDetail { order, items }))
}

/// PUT /api/user/orders/:id/cancel - 取消订单
pub async fn cancel_order(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = manager(&state).cancel_order(id, user.id).await?;
    Ok(ok(order))
}

/// PUT /api/user/orders/:id/return - 退货
pub async fn return_order(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = manager(&state).return_order(id, user.id).await?;
    Ok(ok(order))
}

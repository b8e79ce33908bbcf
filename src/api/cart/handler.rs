//! Cart API Handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CartItem, CartLine};
use crate::db::repository::{CartRepository, ProductRepository};
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    pub product_id: i64,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

/// GET /api/user/cart - 购物车内容与合计
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<CartView>>> {
    let repo = CartRepository::new(state.pool.clone());
    let items = repo.find_lines(user.id).await?;
    let total = items.iter().map(|l| l.total_price).sum();
    Ok(ok(CartView { items, total }))
}

/// POST /api/user/cart/items - 加入购物车 (重复加入则累加数量)
pub async fn add_item(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<AddToCartRequest>,
) -> AppResult<Json<AppResponse<CartItem>>> {
    validate_payload(&req)?;

    let product = ProductRepository::new(state.pool.clone())
        .find_by_id(req.product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", req.product_id)))?;

    if product.stock <= 0 {
        return Err(AppError::business_rule("product is out of stock"));
    }
    if req.quantity > product.stock {
        return Err(AppError::business_rule(
            "requested quantity exceeds available stock",
        ));
    }

    // Snapshot the offer price at add time
    let repo = CartRepository::new(state.pool.clone());
    let item = repo
        .upsert_item(user.id, product.id, req.quantity, product.offer_price)
        .await?;
    Ok(ok(item))
}

/// PUT /api/user/cart/items/:product_id - 修改数量
pub async fn update_item(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(product_id): Path<i64>,
    Json(req): Json<UpdateCartItemRequest>,
) -> AppResult<Json<AppResponse<CartItem>>> {
    validate_payload(&req)?;

    let repo = CartRepository::new(state.pool.clone());
    let item = repo.update_quantity(user.id, product_id, req.quantity).await?;
    Ok(ok(item))
}

/// DELETE /api/user/cart/items/:product_id - 移出购物车
pub async fn remove_item(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = CartRepository::new(state.pool.clone());
    let removed = repo.remove_item(user.id, product_id).await?;
    if !removed {
        return Err(AppError::not_found(format!(
            "Product {} is not in the cart",
            product_id
        )));
    }
    Ok(ok(true))
}

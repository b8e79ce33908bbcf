//! Wishlist API Handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::WishlistLine;
use crate::db::repository::{ProductRepository, WishlistRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/user/wishlist - 心愿单
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<WishlistLine>>>> {
    let repo = WishlistRepository::new(state.pool.clone());
    Ok(ok(repo.find_by_user(user.id).await?))
}

/// POST /api/user/wishlist/:product_id - 加入心愿单 (重复加入为幂等)
pub async fn add(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    ProductRepository::new(state.pool.clone())
        .find_by_id(product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", product_id)))?;

    WishlistRepository::new(state.pool.clone())
        .add(user.id, product_id)
        .await?;
    Ok(ok(()))
}

/// DELETE /api/user/wishlist/:product_id - 移出心愿单
pub async fn remove(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let removed = WishlistRepository::new(state.pool.clone())
        .remove(user.id, product_id)
        .await?;
    if !removed {
        return Err(AppError::not_found(format!(
            "Product {} is not in the wishlist",
            product_id
        )));
    }
    Ok(ok(true))
}

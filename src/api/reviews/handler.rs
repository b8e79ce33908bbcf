//! Review API Handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Review, ReviewCreate};
use crate::db::repository::{ProductRepository, ReviewRepository};
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewRequest {
    pub product_id: i64,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    #[serde(default)]
    pub comment: String,
}

/// POST /api/user/reviews - 新增评价 (每个商品限一条)
pub async fn add_review(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<AddReviewRequest>,
) -> AppResult<Json<AppResponse<Review>>> {
    validate_payload(&req)?;

    ProductRepository::new(state.pool.clone())
        .find_by_id(req.product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", req.product_id)))?;

    let repo = ReviewRepository::new(state.pool.clone());
    if repo.exists(user.id, req.product_id).await? {
        return Err(AppError::business_rule("already reviewed"));
    }

    // The UNIQUE(user_id, product_id) constraint backs up the pre-check
    let review = repo
        .create(ReviewCreate {
            user_id: user.id,
            product_id: req.product_id,
            rating: req.rating,
            comment: req.comment,
        })
        .await?;
    Ok(ok(review))
}

/// DELETE /api/user/reviews/:product_id - 删除自己的评价
pub async fn delete_review(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ReviewRepository::new(state.pool.clone());
    let removed = repo.delete_own(user.id, product_id).await?;
    if !removed {
        return Err(AppError::not_found("no review for this product"));
    }
    Ok(ok(true))
}

//! Product API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::Pagination;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductRating, ProductUpdate, Review};
use crate::db::repository::{CategoryRepository, ProductRepository, ReviewRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub rating: ProductRating,
}

#[derive(Debug, Serialize)]
pub struct ProductReviews {
    pub reviews: Vec<Review>,
    pub rating: ProductRating,
}

/// GET /api/products - 商品列表 (可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let (limit, offset) = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .limit_offset();
    let repo = ProductRepository::new(state.pool.clone());
    Ok(ok(repo.find_all(query.category_id, limit, offset).await?))
}

/// GET /api/products/:id - 商品详情 (含评分)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<ProductDetail>>> {
    let repo = ProductRepository::new(state.pool.clone());
    let product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

    let rating = ReviewRepository::new(state.pool.clone())
        .rating_summary(id)
        .await?;

    Ok(ok(ProductDetail { product, rating }))
}

/// GET /api/products/:id/reviews - 商品评价列表
pub async fn list_reviews(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<ProductReviews>>> {
    let repo = ReviewRepository::new(state.pool.clone());
    let reviews = repo.find_by_product(id).await?;
    let rating = repo.rating_summary(id).await?;
    Ok(ok(ProductReviews { reviews, rating }))
}

fn check_prices(price: Decimal, offer_price: Decimal, stock: i32) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("price must not be negative"));
    }
    if offer_price < Decimal::ZERO || offer_price > price {
        return Err(AppError::validation(
            "offer_price must be between 0 and price",
        ));
    }
    if stock < 0 {
        return Err(AppError::validation("stock must not be negative"));
    }
    Ok(())
}

/// POST /api/admin/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<AppResponse<Product>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    check_prices(
        payload.price,
        payload.offer_price.unwrap_or(payload.price),
        payload.stock,
    )?;

    // Category must exist before product creation
    CategoryRepository::new(state.pool.clone())
        .find_by_id(payload.category_id)
        .await?
        .ok_or_else(|| AppError::invalid("category does not exist"))?;

    let repo = ProductRepository::new(state.pool.clone());
    let product = repo.create(payload).await?;
    Ok(ok(product))
}

/// PUT /api/admin/products/:id - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(stock) = payload.stock
        && stock < 0
    {
        return Err(AppError::validation("stock must not be negative"));
    }
    if let (Some(price), Some(offer)) = (payload.price, payload.offer_price) {
        check_prices(price, offer, 0)?;
    } else if let Some(price) = payload.price
        && price < Decimal::ZERO
    {
        return Err(AppError::validation("price must not be negative"));
    }

    if let Some(category_id) = payload.category_id {
        CategoryRepository::new(state.pool.clone())
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::invalid("category does not exist"))?;
    }

    let repo = ProductRepository::new(state.pool.clone());
    let product = repo.update(id, payload).await?;
    Ok(ok(product))
}

/// DELETE /api/admin/products/:id - 删除商品 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ProductRepository::new(state.pool.clone());
    let result = repo.delete(id).await?;
    if !result {
        return Err(AppError::not_found(format!("Product {} not found", id)));
    }
    Ok(ok(true))
}

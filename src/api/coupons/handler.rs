//! Coupon API Handlers

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::core::ServerState;
use crate::db::models::{Coupon, CouponCreate, CouponUpdate};
use crate::db::repository::CouponRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/user/coupons - 当前可用的优惠券
pub async fn list_active(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Coupon>>>> {
    let repo = CouponRepository::new(state.pool.clone());
    let now = Utc::now();
    let coupons = repo
        .find_all()
        .await?
        .into_iter()
        .filter(|c| c.is_active && c.expires_at > now)
        .collect();
    Ok(ok(coupons))
}

/// GET /api/admin/coupons - 所有优惠券
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Coupon>>>> {
    let repo = CouponRepository::new(state.pool.clone());
    Ok(ok(repo.find_all().await?))
}

fn check_coupon_fields(
    code: &str,
    discount_percent: i32,
    min_order_value: Decimal,
    max_discount: Decimal,
) -> AppResult<()> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation("code must be alphanumeric"));
    }
    if !(1..=100).contains(&discount_percent) {
        return Err(AppError::validation(
            "discount_percent must be between 1 and 100",
        ));
    }
    if min_order_value < Decimal::ZERO {
        return Err(AppError::validation("min_order_value must not be negative"));
    }
    if max_discount <= Decimal::ZERO {
        return Err(AppError::validation("max_discount must be positive"));
    }
    Ok(())
}

/// POST /api/admin/coupons - 创建优惠券
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<Json<AppResponse<Coupon>>> {
    check_coupon_fields(
        &payload.code,
        payload.discount_percent,
        payload.min_order_value,
        payload.max_discount,
    )?;
    if payload.expires_at <= Utc::now() {
        return Err(AppError::validation("expires_at must be in the future"));
    }

    let repo = CouponRepository::new(state.pool.clone());
    let coupon = repo.create(payload).await?;
    Ok(ok(coupon))
}

/// PUT /api/admin/coupons/:code - 更新优惠券
pub async fn update(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<AppResponse<Coupon>>> {
    if let Some(pct) = payload.discount_percent
        && !(1..=100).contains(&pct)
    {
        return Err(AppError::validation(
            "discount_percent must be between 1 and 100",
        ));
    }

    let repo = CouponRepository::new(state.pool.clone());
    let coupon = repo.update(&code, payload).await?;
    Ok(ok(coupon))
}

/// DELETE /api/admin/coupons/:code - 停用优惠券
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = CouponRepository::new(state.pool.clone());
    let result = repo.deactivate(&code).await?;
    if !result {
        return Err(AppError::not_found(format!("Coupon {} not found", code)));
    }
    Ok(ok(true))
}

//! User Profile Handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{Address, AddressCreate, AddressUpdate, UserProfile};
use crate::db::repository::{AddressRepository, UserRepository};
use crate::utils::validation::{MAX_ADDRESS_LEN, validate_payload, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 200, message = "must be 2-200 characters"))]
    pub name: String,
    #[validate(length(min = 10, max = 15, message = "must be 10-15 digits"))]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128, message = "must be 8-128 characters"))]
    pub new_password: String,
}

/// GET /api/user/profile - 获取个人资料
pub async fn get_profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<UserProfile>>> {
    let repo = UserRepository::new(state.pool.clone());
    let profile = repo
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))?;
    Ok(ok(profile.into()))
}

/// PUT /api/user/profile - 更新个人资料
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<AppResponse<UserProfile>>> {
    validate_payload(&req)?;

    let repo = UserRepository::new(state.pool.clone());
    let updated = repo.update_profile(user.id, &req.name, &req.phone).await?;
    Ok(ok(updated.into()))
}

/// PUT /api/user/password - 修改密码
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validate_payload(&req)?;

    let repo = UserRepository::new(state.pool.clone());
    let account = repo
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))?;

    if !verify_password(&req.current_password, &account.password_hash)? {
        return Err(AppError::invalid("current password is incorrect"));
    }

    let new_hash = hash_password(&req.new_password)?;
    repo.update_password(user.id, &new_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(ok_with_message((), "password updated"))
}

/// GET /api/user/addresses - 收货地址列表
pub async fn list_addresses(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<Address>>>> {
    let repo = AddressRepository::new(state.pool.clone());
    Ok(ok(repo.find_by_user(user.id).await?))
}

/// POST /api/user/addresses - 新增收货地址
pub async fn add_address(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<AddressCreate>,
) -> AppResult<Json<AppResponse<Address>>> {
    for (value, field) in [
        (&payload.house, "house"),
        (&payload.street, "street"),
        (&payload.city, "city"),
        (&payload.state, "state"),
        (&payload.pincode, "pincode"),
    ] {
        validate_required_text(value, field, MAX_ADDRESS_LEN)?;
    }

    let repo = AddressRepository::new(state.pool.clone());
    let address = repo.create(user.id, payload).await?;
    Ok(ok(address))
}

/// PUT /api/user/addresses/:id - 更新收货地址
pub async fn update_address(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<AddressUpdate>,
) -> AppResult<Json<AppResponse<Address>>> {
    let repo = AddressRepository::new(state.pool.clone());
    let address = repo.update(id, user.id, payload).await?;
    Ok(ok(address))
}

/// DELETE /api/user/addresses/:id - 删除收货地址
pub async fn delete_address(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = AddressRepository::new(state.pool.clone());
    let removed = repo.delete(id, user.id).await?;
    if !removed {
        return Err(AppError::not_found(format!("Address {} not found", id)));
    }
    Ok(ok(true))
}

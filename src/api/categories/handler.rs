//! Category API Handlers

use axum::Json;
use axum::extract::{Path, State};

use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::db::repository::CategoryRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/categories - 获取所有分类
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Category>>>> {
    let repo = CategoryRepository::new(state.pool.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/categories/:id - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Category>>> {
    let repo = CategoryRepository::new(state.pool.clone());
    let category = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", id)))?;
    Ok(ok(category))
}

/// POST /api/admin/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<AppResponse<Category>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = CategoryRepository::new(state.pool.clone());
    let category = repo.create(payload).await?;
    Ok(ok(category))
}

/// PUT /api/admin/categories/:id - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<AppResponse<Category>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = CategoryRepository::new(state.pool.clone());
    let category = repo.update(id, payload).await?;
    Ok(ok(category))
}

/// DELETE /api/admin/categories/:id - 删除分类 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = CategoryRepository::new(state.pool.clone());
    let result = repo.delete(id).await?;
    if !result {
        return Err(AppError::not_found(format!("Category {} not found", id)));
    }
    Ok(ok(true))
}

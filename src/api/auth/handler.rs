//! Authentication Handlers
//!
//! Handles signup staging, OTP verification, login, and OAuth callback

use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{PendingUserCreate, User, UserProfile};
use crate::db::repository::{OtpRepository, UserRepository, WalletRepository};
use crate::services::{GoogleOauth, generate_code};
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// OTP purpose tag for signup verification
const OTP_PURPOSE_SIGNUP: &str = "signup";

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, max = 200, message = "must be 2-200 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 10, max = 15, message = "must be 10-15 digits"))]
    pub phone: String,
    #[validate(length(min = 8, max = 128, message = "must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(equal = 6, message = "must be the 6-digit code"))]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct OauthCallbackQuery {
    pub code: String,
}

/// POST /api/auth/signup - 注册 (暂存 + 发送 OTP)
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validate_payload(&req)?;

    let users = UserRepository::new(state.pool.clone());
    if users.identity_taken(&req.email, &req.phone).await? {
        return Err(AppError::conflict(
            "user with this email or phone already exists",
        ));
    }

    let password_hash = hash_password(&req.password)?;
    users
        .stage_pending(PendingUserCreate {
            name: req.name,
            email: req.email.clone(),
            phone: req.phone,
            password_hash,
        })
        .await?;

    let code = generate_code();
    OtpRepository::new(state.pool.clone())
        .issue(&req.email, &code, OTP_PURPOSE_SIGNUP)
        .await?;
    state.mailer.send_otp(&req.email, &code).await?;

    tracing::info!(email = %req.email, "Signup staged, OTP sent");
    Ok(ok_with_message((), "OTP sent to your email"))
}

/// POST /api/auth/verify-otp - 校验 OTP 并激活账号
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(req): Json<VerifyOtpRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    validate_payload(&req)?;

    let otps = OtpRepository::new(state.pool.clone());
    let otp = otps
        .find_valid(&req.email, &req.code, OTP_PURPOSE_SIGNUP)
        .await?
        .ok_or_else(|| AppError::invalid("invalid or expired OTP"))?;

    let users = UserRepository::new(state.pool.clone());
    let pending = users
        .find_pending_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::not_found("no pending signup for this email"))?;

    // Promote + wallet creation are one transaction
    let mut tx = state.pool.begin().await?;
    let user = users.promote_pending(&mut *tx, &pending).await?;
    WalletRepository::new(state.pool.clone())
        .create_for_user(&mut *tx, user.id)
        .await?;
    tx.commit().await?;

    otps.consume(otp.id).await?;

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, email = %user.email, "Signup verified");
    Ok(ok(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login - 用户登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    validate_payload(&req)?;
    let user = authenticate(&state, &req).await?;

    if user.is_blocked {
        return Err(AppError::forbidden("account has been blocked".to_string()));
    }

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, email = %user.email, "User logged in");
    Ok(ok(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/admin/login - 管理员登录
pub async fn admin_login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    validate_payload(&req)?;
    let user = authenticate(&state, &req).await?;

    if !user.is_admin {
        tracing::warn!(email = %user.email, "Admin login attempted by non-admin");
        return Err(AppError::forbidden("admin access required".to_string()));
    }

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, email = %user.email, "Admin logged in");
    Ok(ok(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// Shared credential check with a fixed delay and a unified error message
/// to prevent timing attacks and email enumeration.
async fn authenticate(state: &ServerState, req: &LoginRequest) -> AppResult<User> {
    let users = UserRepository::new(state.pool.clone());
    let user = users.find_by_email(&req.email).await?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid("invalid email or password"));
        }
    };

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::warn!(email = %req.email, "Login failed - invalid credentials");
        return Err(AppError::invalid("invalid email or password"));
    }

    Ok(user)
}

/// GET /api/auth/google/login - 跳转 Google 授权页
pub async fn google_login(State(state): State<ServerState>) -> Redirect {
    let oauth = GoogleOauth::new(state.config.google.clone());
    Redirect::temporary(&oauth.authorize_url())
}

/// GET /api/auth/google/callback - OAuth 回调，换取令牌并登录/注册
pub async fn google_callback(
    State(state): State<ServerState>,
    Query(query): Query<OauthCallbackQuery>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let oauth = GoogleOauth::new(state.config.google.clone());
    let profile = oauth.exchange_code(&query.code).await?;

    let users = UserRepository::new(state.pool.clone());
    let user = match users.find_by_email(&profile.email).await? {
        Some(u) => u,
        None => {
            // First OAuth login: create the account with an unusable random
            // password and a placeholder phone (OAuth does not supply one).
            let password_hash = hash_password(&Uuid::new_v4().to_string())?;
            let phone = format!("g-{}", &Uuid::new_v4().simple().to_string()[..12]);
            let name = if profile.name.is_empty() {
                profile.email.clone()
            } else {
                profile.name.clone()
            };

            let mut tx = state.pool.begin().await?;
            let user = users
                .insert(&mut *tx, &name, &profile.email, &phone, &password_hash)
                .await?;
            WalletRepository::new(state.pool.clone())
                .create_for_user(&mut *tx, user.id)
                .await?;
            tx.commit().await?;

            tracing::info!(user_id = user.id, email = %user.email, "User created via OAuth");
            user
        }
    };

    if user.is_blocked {
        return Err(AppError::forbidden("account has been blocked".to_string()));
    }

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    Ok(ok(LoginResponse {
        token,
        user: user.into(),
    }))
}

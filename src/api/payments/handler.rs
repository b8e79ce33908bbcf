//! Payment API Handlers
//!
//! Creates gateway order intents and verifies the signature the client
//! returns after paying. Verification is idempotent: a repeat call for an
//! already-paid order succeeds without side effects.

use axum::extract::State;
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{PaymentMethod, PaymentStatus};
use crate::db::repository::{OrderRepository, PaymentRepository};
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub gateway_order_id: String,
    pub amount: Decimal,
    pub key_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub gateway_order_id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub gateway_payment_id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub signature: String,
}

/// POST /api/user/payments/create - 创建支付网关订单
pub async fn create_payment(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreatePaymentRequest>,
) -> AppResult<Json<AppResponse<CreatePaymentResponse>>> {
    let orders = OrderRepository::new(state.pool.clone());
    let order = orders
        .find_by_id(req.order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", req.order_id)))?;

    if order.user_id != user.id {
        return Err(AppError::forbidden(
            "order does not belong to this user".to_string(),
        ));
    }
    if order.payment_method != PaymentMethod::Razorpay {
        return Err(AppError::business_rule(
            "order is not payable through the gateway",
        ));
    }
    if order.payment_status == PaymentStatus::Paid {
        return Err(AppError::business_rule("order is already paid"));
    }

    let gateway_order_id = state
        .gateway
        .create_order(order.final_price, &order.id.to_string())
        .await?;

    PaymentRepository::new(state.pool.clone())
        .create_intent(order.id, &gateway_order_id, order.final_price)
        .await?;

    tracing::info!(order_id = order.id, %gateway_order_id, "Payment intent created");
    Ok(ok(CreatePaymentResponse {
        gateway_order_id,
        amount: order.final_price,
        key_id: state.config.razorpay.key_id.clone(),
    }))
}

/// POST /api/user/payments/verify - 校验支付签名并标记已支付
pub async fn verify_payment(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<VerifyPaymentRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    validate_payload(&req)?;

    // Signature first: never touch state on a forged request
    if !state.gateway.verify_signature(
        &req.gateway_order_id,
        &req.gateway_payment_id,
        &req.signature,
    ) {
        tracing::warn!(gateway_order_id = %req.gateway_order_id, "Payment signature mismatch");
        return Err(AppError::invalid("payment signature verification failed"));
    }

    let payments = PaymentRepository::new(state.pool.clone());
    let payment = payments
        .find_by_gateway_order(&req.gateway_order_id)
        .await?
        .ok_or_else(|| AppError::not_found("no payment intent for this gateway order"))?;

    let orders = OrderRepository::new(state.pool.clone());
    let order = orders
        .find_by_id(payment.order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", payment.order_id)))?;

    if order.user_id != user.id {
        return Err(AppError::forbidden(
            "order does not belong to this user".to_string(),
        ));
    }

    // Idempotent: a second verify of a paid order is a successful no-op
    if order.payment_status == PaymentStatus::Paid {
        return Ok(ok_with_message((), "payment already verified"));
    }

    let mut tx = state.pool.begin().await?;
    payments
        .mark_paid(&mut *tx, payment.id, &req.gateway_payment_id)
        .await?;
    orders
        .update_payment_status(&mut *tx, order.id, PaymentStatus::Paid)
        .await?;
    tx.commit().await?;

    tracing::info!(order_id = order.id, "Payment verified");
    Ok(ok_with_message((), "payment verified"))
}

//! Coupon Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Coupon {
    pub code: String,
    pub discount_percent: i32,
    pub min_order_value: Decimal,
    pub max_discount: Decimal,
    /// Maximum redemptions per user
    pub usage_limit: i32,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub discount_percent: i32,
    pub min_order_value: Decimal,
    pub max_discount: Decimal,
    pub usage_limit: Option<i32>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CouponUpdate {
    pub discount_percent: Option<i32>,
    pub min_order_value: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub usage_limit: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

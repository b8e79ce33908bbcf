//! Order Model
//!
//! Row types and persistence enums. Status transition rules live in
//! [`crate::orders`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
    Failed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
            OrderStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Failed,
}

/// How an order is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cod,
    Razorpay,
    Wallet,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub address_id: i64,
    pub coupon_code: Option<String>,
    pub discount: Decimal,
    pub grand_total: Decimal,
    pub final_price: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub total_price: Decimal,
}

/// Insert payload for the order row (written inside the checkout transaction)
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: i64,
    pub address_id: i64,
    pub coupon_code: Option<String>,
    pub discount: Decimal,
    pub grand_total: Decimal,
    pub final_price: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
}

/// Insert payload for one order line
#[derive(Debug, Clone)]
pub struct OrderItemCreate {
    pub product_id: i64,
    pub quantity: i32,
    pub total_price: Decimal,
}

/// Brief order summary returned after placement
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_id: i64,
    pub final_price: Decimal,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
}

impl From<&Order> for OrderSummary {
    fn from(o: &Order) -> Self {
        Self {
            order_id: o.id,
            final_price: o.final_price,
            order_status: o.order_status,
            payment_status: o.payment_status,
        }
    }
}

/// One row of the admin sales report
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SalesRow {
    pub day: chrono::NaiveDate,
    pub orders: i64,
    pub revenue: Decimal,
}

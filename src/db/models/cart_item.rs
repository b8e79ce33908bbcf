//! Cart Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row per (user, product); repeat add-to-cart updates the row in place.
///
/// `unit_price` is a snapshot of the product's offer price at add time;
/// `total_price` is always `quantity × unit_price`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Cart line joined with product data for display
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLine {
    pub product_id: i64,
    pub product_name: String,
    pub image: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

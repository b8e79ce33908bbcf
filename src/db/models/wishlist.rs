//! Wishlist Model

use rust_decimal::Decimal;
use serde::Serialize;

/// Wishlist entry joined with product data for display
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WishlistLine {
    pub product_id: i64,
    pub product_name: String,
    pub image: String,
    pub price: Decimal,
    pub offer_price: Decimal,
    pub in_stock: bool,
}

//! Review Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReviewCreate {
    pub user_id: i64,
    pub product_id: i64,
    pub rating: i32,
    pub comment: String,
}

/// Aggregate rating for a product
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductRating {
    pub average: Option<f64>,
    pub count: i64,
}

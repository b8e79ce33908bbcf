//! OTP Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One-time code emailed during signup / password reset
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Otp {
    pub id: i64,
    pub email: String,
    pub code: String,
    pub purpose: String,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
    pub created_at: DateTime<Utc>,
}

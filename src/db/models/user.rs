//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User row. Users are never hard-deleted; `deleted_at` marks removal.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_blocked: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Staged signup awaiting OTP verification
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PendingUserCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

/// Public view of a user (what the API returns)
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            is_blocked: u.is_blocked,
            created_at: u.created_at,
        }
    }
}

//! Address Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub house: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressCreate {
    pub house: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressUpdate {
    pub house: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub is_default: Option<bool>,
}

//! Buyer Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Buyer model matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buyer {
    pub buyer_id: String,
    pub buyer_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    /// YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: i64,
}

/// Buyer signup payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BuyerCreate {
    #[validate(length(min = 1, max = 200))]
    pub buyer_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Buyer profile update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BuyerUpdate {
    #[validate(length(min = 1, max = 200))]
    pub buyer_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Buyer {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        crate::db::models::employee::verify_password(&self.hash_pass, password)
    }
}

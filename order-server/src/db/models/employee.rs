//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee model matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub employee_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    /// YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Department code (e.g. S1, P1, AD); unassigned employees carry none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_code: Option<String>,
    pub created_at: i64,
}

/// Employee signup payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 200))]
    pub employee_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub date_of_birth: Option<String>,
    pub department_code: Option<String>,
}

/// Employee update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = 200))]
    pub employee_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub department_code: Option<String>,
}

impl Employee {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        verify_password(&self.hash_pass, password)
    }
}

/// Verify a password against a stored argon2 hash
pub fn verify_password(
    hash_pass: &str,
    password: &str,
) -> Result<bool, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let parsed_hash = PasswordHash::new(hash_pass)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash a password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

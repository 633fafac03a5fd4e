//! Department Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Department model matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// Short code, e.g. S1 (sourcing), P1 (production), AD (admin)
    pub department_code: String,
    pub department_name: String,
    pub created_at: i64,
}

/// Department creation payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCreate {
    #[validate(length(min = 1, max = 10))]
    pub department_code: String,
    #[validate(length(min = 1, max = 200))]
    pub department_name: String,
}

/// Department update payload; the code is immutable
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentUpdate {
    #[validate(length(min = 1, max = 200))]
    pub department_name: Option<String>,
}

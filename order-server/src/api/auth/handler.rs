//! Authentication Handlers
//!
//! Signup and signin for both user types. Signin returns a JWT carrying
//! the user type, department code and derived roles.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::{BUYER_ROLE, UserType, roles_for_department};
use crate::core::ServerState;
use crate::db::models::{BuyerCreate, EmployeeCreate};
use crate::db::repository::{BuyerRepository, DepartmentRepository, EmployeeRepository};
use crate::utils::{AppError, AppResponse, ok, validation::validate_payload};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_code: Option<String>,
    pub roles: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Buyer signup
pub async fn buyer_signup(
    State(state): State<ServerState>,
    Json(payload): Json<BuyerCreate>,
) -> Result<Json<AppResponse<UserInfo>>, AppError> {
    validate_payload(&payload)?;

    let repo = BuyerRepository::new(state.get_db());
    let buyer = repo.create(payload).await?;

    info!(buyer_id = %buyer.buyer_id, "Buyer registered");
    Ok(ok(UserInfo {
        id: buyer.buyer_id,
        name: buyer.buyer_name,
        email: buyer.email,
        user_type: UserType::Buyer.as_str(),
        department_code: None,
        roles: vec![BUYER_ROLE.to_string()],
    }))
}

/// Buyer signin
pub async fn buyer_signin(
    State(state): State<ServerState>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<AppResponse<AuthResponse>>, AppError> {
    validate_payload(&payload)?;

    let repo = BuyerRepository::new(state.get_db());
    let buyer = repo.find_by_email(&payload.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let buyer = match buyer {
        Some(b) => {
            let password_valid = b
                .verify_password(&payload.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !password_valid {
                warn!(email = %payload.email, "Buyer signin failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            b
        }
        None => {
            warn!(email = %payload.email, "Buyer signin failed - unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    let roles = vec![BUYER_ROLE.to_string()];
    let token = state
        .jwt_service()
        .generate_token(&buyer.buyer_id, UserType::Buyer, &buyer.email, None, &roles)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    info!(buyer_id = %buyer.buyer_id, "Buyer signed in");
    Ok(ok(AuthResponse {
        token,
        user: UserInfo {
            id: buyer.buyer_id,
            name: buyer.buyer_name,
            email: buyer.email,
            user_type: UserType::Buyer.as_str(),
            department_code: None,
            roles,
        },
    }))
}

/// Employee signup
pub async fn employee_signup(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> Result<Json<AppResponse<UserInfo>>, AppError> {
    validate_payload(&payload)?;

    // Department, when given, must exist
    if let Some(code) = payload.department_code.as_deref() {
        let departments = DepartmentRepository::new(state.get_db());
        departments
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::validation(format!("Department {code} does not exist")))?;
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.create(payload).await?;

    info!(employee_id = %employee.employee_id, "Employee registered");
    let roles = roles_for_department(employee.department_code.as_deref());
    Ok(ok(UserInfo {
        id: employee.employee_id,
        name: employee.employee_name,
        email: employee.email,
        user_type: UserType::Employee.as_str(),
        department_code: employee.department_code,
        roles,
    }))
}

/// Employee signin
pub async fn employee_signin(
    State(state): State<ServerState>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<AppResponse<AuthResponse>>, AppError> {
    validate_payload(&payload)?;

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.find_by_email(&payload.email).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let employee = match employee {
        Some(e) => {
            let password_valid = e
                .verify_password(&payload.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !password_valid {
                warn!(email = %payload.email, "Employee signin failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            e
        }
        None => {
            warn!(email = %payload.email, "Employee signin failed - unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    let roles = roles_for_department(employee.department_code.as_deref());
    let token = state
        .jwt_service()
        .generate_token(
            &employee.employee_id,
            UserType::Employee,
            &employee.email,
            employee.department_code.as_deref(),
            &roles,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    info!(employee_id = %employee.employee_id, "Employee signed in");
    Ok(ok(AuthResponse {
        token,
        user: UserInfo {
            id: employee.employee_id,
            name: employee.employee_name,
            email: employee.email,
            user_type: UserType::Employee.as_str(),
            department_code: employee.department_code,
            roles,
        },
    }))
}

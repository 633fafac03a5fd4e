//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Department, DepartmentCreate, DepartmentUpdate};
use crate::db::repository::{DepartmentRepository, EmployeeRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok, validation::validate_payload};

/// List all departments
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Department>>>> {
    let repo = DepartmentRepository::new(state.get_db());
    let departments = repo.find_all().await?;
    Ok(ok(departments))
}

/// Get department by code
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<AppResponse<Department>>> {
    let repo = DepartmentRepository::new(state.get_db());
    let department = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Department {code} not found")))?;
    Ok(ok(department))
}

/// Create a new department
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<AppResponse<Department>>> {
    validate_payload(&payload)?;

    let repo = DepartmentRepository::new(state.get_db());
    let department = repo.create(payload).await?;
    Ok(ok(department))
}

/// Rename a department
pub async fn update(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<DepartmentUpdate>,
) -> AppResult<Json<AppResponse<Department>>> {
    validate_payload(&payload)?;

    let repo = DepartmentRepository::new(state.get_db());
    let department = repo.update(&code, payload).await?;
    Ok(ok(department))
}

/// Delete a department; refused while employees still reference it
pub async fn delete(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let employees = EmployeeRepository::new(state.get_db());
    if !employees.find_by_department(&code).await?.is_empty() {
        return Err(AppError::conflict(format!(
            "Department {code} still has employees"
        )));
    }

    let repo = DepartmentRepository::new(state.get_db());
    repo.delete(&code).await?;
    Ok(ok(serde_json::json!({ "deleted": code })))
}

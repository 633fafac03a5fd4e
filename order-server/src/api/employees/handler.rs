//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeUpdate};
use crate::db::repository::{DepartmentRepository, EmployeeRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok, validation::validate_payload};

#[derive(Debug, Default, Deserialize)]
pub struct EmployeeListQuery {
    /// Optional department filter, e.g. `?department=S1`
    pub department: Option<String>,
}

/// List employees, optionally filtered by department
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EmployeeListQuery>,
) -> AppResult<Json<AppResponse<Vec<Employee>>>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employees = match query.department.as_deref() {
        Some(code) => repo.find_by_department(code).await?,
        None => repo.find_all().await?,
    };
    Ok(ok(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Employee>>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    Ok(ok(employee))
}

/// Update an employee (admin only, enforced by the route layer)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<AppResponse<Employee>>> {
    validate_payload(&payload)?;

    // A reassigned department must exist
    if let Some(code) = payload.department_code.as_deref() {
        let departments = DepartmentRepository::new(state.get_db());
        departments
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::validation(format!("Department {code} does not exist")))?;
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.update(&id, payload).await?;
    Ok(ok(employee))
}

/// Delete an employee (admin only, enforced by the route layer)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let repo = EmployeeRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok(serde_json::json!({ "deleted": id })))
}

//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::employee::hash_password;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by its opaque id
    pub async fn find_by_id(&self, employee_id: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE employee_id = $employee_id LIMIT 1")
            .bind(("employee_id", employee_id.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Find employee by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Find all employees of one department
    pub async fn find_by_department(&self, department_code: &str) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE department_code = $code ORDER BY employee_name")
            .bind(("code", department_code.to_string()))
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Create a new employee
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }

        let hash_pass = hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
        let employee_id = shared::util::new_id();

        // hash_pass is bound explicitly: the model skips it on serialize
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    employee_id = $employee_id,
                    employee_name = $employee_name,
                    email = $email,
                    hash_pass = $hash_pass,
                    date_of_birth = $date_of_birth,
                    department_code = $department_code,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("employee_id", employee_id))
            .bind(("employee_name", data.employee_name))
            .bind(("email", data.email))
            .bind(("hash_pass", hash_pass))
            .bind(("date_of_birth", data.date_of_birth))
            .bind(("department_code", data.department_code))
            .bind(("created_at", shared::util::now_millis()))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Update profile fields; absent fields keep their current value
    pub async fn update(&self, employee_id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let current = self
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {employee_id} not found")))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE employee SET
                    employee_name = $employee_name,
                    date_of_birth = $date_of_birth,
                    department_code = $department_code
                WHERE employee_id = $employee_id
                RETURN AFTER"#,
            )
            .bind(("employee_id", employee_id.to_string()))
            .bind((
                "employee_name",
                data.employee_name.unwrap_or(current.employee_name),
            ))
            .bind(("date_of_birth", data.date_of_birth.or(current.date_of_birth)))
            .bind((
                "department_code",
                data.department_code.or(current.department_code),
            ))
            .await?;

        let updated: Option<Employee> = result.take(0)?;
        updated.ok_or_else(|| RepoError::Database("Failed to update employee".to_string()))
    }

    /// Delete an employee
    pub async fn delete(&self, employee_id: &str) -> RepoResult<()> {
        self.find_by_id(employee_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {employee_id} not found")))?;

        self.base
            .db()
            .query("DELETE employee WHERE employee_id = $employee_id")
            .bind(("employee_id", employee_id.to_string()))
            .await?;
        Ok(())
    }
}

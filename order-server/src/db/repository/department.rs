//! Department Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Department, DepartmentCreate, DepartmentUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct DepartmentRepository {
    base: BaseRepository,
}

impl DepartmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all departments ordered by code
    pub async fn find_all(&self) -> RepoResult<Vec<Department>> {
        let departments: Vec<Department> = self
            .base
            .db()
            .query("SELECT * FROM department ORDER BY department_code")
            .await?
            .take(0)?;
        Ok(departments)
    }

    /// Find department by code
    pub async fn find_by_code(&self, department_code: &str) -> RepoResult<Option<Department>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM department WHERE department_code = $code LIMIT 1")
            .bind(("code", department_code.to_string()))
            .await?;
        let departments: Vec<Department> = result.take(0)?;
        Ok(departments.into_iter().next())
    }

    /// Create a new department
    pub async fn create(&self, data: DepartmentCreate) -> RepoResult<Department> {
        if self.find_by_code(&data.department_code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Department '{}' already exists",
                data.department_code
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE department SET
                    department_code = $department_code,
                    department_name = $department_name,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("department_code", data.department_code))
            .bind(("department_name", data.department_name))
            .bind(("created_at", shared::util::now_millis()))
            .await?;

        let created: Option<Department> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create department".to_string()))
    }

    /// Rename a department; the code is immutable
    pub async fn update(
        &self,
        department_code: &str,
        data: DepartmentUpdate,
    ) -> RepoResult<Department> {
        let current = self
            .find_by_code(department_code)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(format!("Department {department_code} not found"))
            })?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE department SET
                    department_name = $department_name
                WHERE department_code = $code
                RETURN AFTER"#,
            )
            .bind(("code", department_code.to_string()))
            .bind((
                "department_name",
                data.department_name.unwrap_or(current.department_name),
            ))
            .await?;

        let updated: Option<Department> = result.take(0)?;
        updated.ok_or_else(|| RepoError::Database("Failed to update department".to_string()))
    }

    /// Delete a department
    pub async fn delete(&self, department_code: &str) -> RepoResult<()> {
        self.find_by_code(department_code)
            .await?
            .ok_or_else(|| {
                RepoError::NotFound(format!("Department {department_code} not found"))
            })?;

        self.base
            .db()
            .query("DELETE department WHERE department_code = $code")
            .bind(("code", department_code.to_string()))
            .await?;
        Ok(())
    }
}

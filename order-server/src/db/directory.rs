//! Directory implementation over the entity repositories

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{BuyerRepository, EmployeeRepository};
use crate::orders::directory::{BuyerRef, Directory, EmployeeRef};
use crate::orders::error::{OrderError, OrderResult};

/// [`Directory`] backed by the SurrealDB entity tables
#[derive(Clone)]
pub struct DbDirectory {
    buyers: BuyerRepository,
    employees: EmployeeRepository,
}

impl DbDirectory {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            buyers: BuyerRepository::new(db.clone()),
            employees: EmployeeRepository::new(db),
        }
    }
}

#[async_trait]
impl Directory for DbDirectory {
    async fn find_buyer(&self, buyer_id: &str) -> OrderResult<Option<BuyerRef>> {
        let buyer = self
            .buyers
            .find_by_id(buyer_id)
            .await
            .map_err(|e| OrderError::Directory(e.to_string()))?;
        Ok(buyer.map(|b| BuyerRef {
            buyer_id: b.buyer_id,
            buyer_name: b.buyer_name,
        }))
    }

    async fn find_employee(&self, employee_id: &str) -> OrderResult<Option<EmployeeRef>> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await
            .map_err(|e| OrderError::Directory(e.to_string()))?;
        Ok(employee.map(|e| EmployeeRef {
            employee_id: e.employee_id,
            employee_name: e.employee_name,
            department_code: e.department_code,
        }))
    }
}

//! Party directory consumed by the workflow
//!
//! The workflow only needs existence and department membership of the
//! parties it touches. Putting that behind a trait keeps the state machine
//! independent of the entity database and testable with an in-memory map.

use async_trait::async_trait;

use crate::orders::error::OrderResult;

/// Minimal buyer view needed by the workflow and history engine
#[derive(Debug, Clone)]
pub struct BuyerRef {
    pub buyer_id: String,
    pub buyer_name: String,
}

/// Minimal employee view needed by the workflow
#[derive(Debug, Clone)]
pub struct EmployeeRef {
    pub employee_id: String,
    pub employee_name: String,
    pub department_code: Option<String>,
}

/// Lookup collaborator for buyers and employees
#[async_trait]
pub trait Directory: Send + Sync {
    async fn find_buyer(&self, buyer_id: &str) -> OrderResult<Option<BuyerRef>>;

    async fn find_employee(&self, employee_id: &str) -> OrderResult<Option<EmployeeRef>>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Fixed in-memory directory for workflow tests
    #[derive(Default)]
    pub struct StaticDirectory {
        buyers: HashMap<String, BuyerRef>,
        employees: HashMap<String, EmployeeRef>,
    }

    impl StaticDirectory {
        pub fn with_buyer(mut self, id: &str, name: &str) -> Self {
            self.buyers.insert(
                id.to_string(),
                BuyerRef {
                    buyer_id: id.to_string(),
                    buyer_name: name.to_string(),
                },
            );
            self
        }

        pub fn with_employee(mut self, id: &str, name: &str, department: Option<&str>) -> Self {
            self.employees.insert(
                id.to_string(),
                EmployeeRef {
                    employee_id: id.to_string(),
                    employee_name: name.to_string(),
                    department_code: department.map(str::to_string),
                },
            );
            self
        }
    }

    #[async_trait]
    impl Directory for StaticDirectory {
        async fn find_buyer(&self, buyer_id: &str) -> OrderResult<Option<BuyerRef>> {
            Ok(self.buyers.get(buyer_id).cloned())
        }

        async fn find_employee(&self, employee_id: &str) -> OrderResult<Option<EmployeeRef>> {
            Ok(self.employees.get(employee_id).cloned())
        }
    }
}

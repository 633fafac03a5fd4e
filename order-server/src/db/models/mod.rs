//! Database Models
//!
//! Entity models matching the SurrealDB tables.

pub mod buyer;
pub mod department;
pub mod employee;

pub use buyer::{Buyer, BuyerCreate, BuyerUpdate};
pub use department::{Department, DepartmentCreate, DepartmentUpdate};
pub use employee::{Employee, EmployeeCreate, EmployeeUpdate};

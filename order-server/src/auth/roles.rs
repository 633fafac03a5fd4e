//! Department-to-role mapping
//!
//! Pure lookup table mirroring the organizational capability model.
//! The workflow keeps its own S1 check and never consults this table;
//! these roles only shape the issued JWT.

/// Role granted to every buyer account
pub const BUYER_ROLE: &str = "buyer";

/// Roles carried by an employee JWT, derived from department code
pub fn roles_for_department(department_code: Option<&str>) -> Vec<String> {
    let roles: &[&str] = match department_code {
        Some("S1") => &["sourcing", "approve_order", "reject_order"],
        Some("P1") => &["production", "manufacture_order"],
        Some("AD") => &["admin"],
        _ => &["employee"],
    };
    roles.iter().map(|r| r.to_string()).collect()
}

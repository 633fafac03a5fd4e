//! Order versioning core
//!
//! Models each order as an append-only chain of immutable detail
//! snapshots instead of a single mutable row:
//!
//! - [`store`] - redb-backed snapshot store (ordered, append-only)
//! - [`workflow`] - legal transitions: create, buyer revision,
//!   sourcing confirm/reject
//! - [`history`] - derived version numbering, point-in-time and
//!   cross-version queries
//! - [`directory`] - buyer/employee lookup seam

pub mod directory;
pub mod error;
pub mod history;
pub mod store;
pub mod workflow;

pub use directory::{BuyerRef, Directory, EmployeeRef};
pub use error::{OrderError, OrderResult};
pub use store::{SnapshotStore, StoreError};
pub use workflow::{OrderService, SOURCING_DEPARTMENT};

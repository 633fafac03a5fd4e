//! Shared types for the order-management backend
//!
//! Domain types used by the server and any future client: order and
//! snapshot value types, history query/view types, and time helpers.

pub mod order;
pub mod util;

// Re-exports
pub use order::{
    HistoryQuery, HistoryView, OrderDetail, OrderDetailPatch, OrderDetailSnapshot, OrderRecord,
    OrderStatus, SnapshotStatus,
};
pub use serde::{Deserialize, Serialize};

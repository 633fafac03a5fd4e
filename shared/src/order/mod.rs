//! Order domain types
//!
//! An order is an append-only chain of immutable detail snapshots.
//! The header row carries the workflow status; every revision,
//! confirmation or rejection appends a new snapshot instead of
//! mutating an existing one.

pub mod history;
pub mod snapshot;
pub mod types;

pub use history::{
    BuyerSummary, FieldChange, FullHistory, HistoryQuery, HistoryView, TimeTravelView,
    VersionDiff, VersionedSnapshot,
};
pub use snapshot::OrderDetailSnapshot;
pub use types::{
    OrderDetail, OrderDetailPatch, OrderRecord, OrderStatus, SnapshotStatus, UnknownStatusCode,
};

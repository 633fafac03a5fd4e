//! History query and view types
//!
//! Versions are derived, never stored: version N is the N-th CONFIRMED
//! snapshot in ascending sequence order. Pending and rejected snapshots
//! never consume a version number.

use serde::{Deserialize, Serialize};

use super::snapshot::OrderDetailSnapshot;
use super::types::OrderStatus;

/// Query parameters accepted by the history endpoint.
///
/// Dispatch priority when several are present: compare
/// (`from_version` + `to_version`), then `version`, then `timestamp`,
/// then full history.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub version: Option<u32>,
    /// ISO-8601, Unix seconds (10 digits) or Unix millis (13 digits)
    pub timestamp: Option<String>,
    pub from_version: Option<u32>,
    pub to_version: Option<u32>,
}

/// Buyer fields exposed in history views
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuyerSummary {
    pub buyer_id: String,
    pub buyer_name: String,
}

/// A confirmed snapshot annotated with its derived version number
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VersionedSnapshot {
    pub version: u32,
    #[serde(flatten)]
    pub snapshot: OrderDetailSnapshot,
}

/// Full history of an order: every confirmed snapshot with its version
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullHistory {
    pub order_id: String,
    pub buyer: BuyerSummary,
    pub current_status: OrderStatus,
    pub total_versions: u32,
    pub history: Vec<VersionedSnapshot>,
}

/// Point-in-time view: the last snapshot (any status) at or before the
/// requested timestamp
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTravelView {
    pub requested_timestamp: String,
    /// Number of confirmed snapshots up to and including the selected
    /// one, i.e. the version in effect at that moment
    pub version: u32,
    #[serde(flatten)]
    pub snapshot: OrderDetailSnapshot,
}

/// One changed field in a version comparison
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub from: serde_json::Value,
    pub to: serde_json::Value,
    /// Present only when both values are numeric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<i64>,
}

/// Field-by-field comparison of two confirmed versions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDiff {
    pub from_version: u32,
    pub to_version: u32,
    pub from: VersionedSnapshot,
    pub to: VersionedSnapshot,
    pub changes: Vec<FieldChange>,
    pub changed_fields: usize,
}

/// Result of a history query, shaped by the query parameters
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HistoryView {
    Compare(VersionDiff),
    Version(VersionedSnapshot),
    TimeTravel(TimeTravelView),
    Full(FullHistory),
}

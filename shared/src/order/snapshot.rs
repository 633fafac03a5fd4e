//! Order detail snapshot: one immutable version of an order's line items
//!
//! Snapshots are never mutated or removed once stored. Revisions are
//! expressed by deriving a new snapshot from the previous one
//! ([`OrderDetailSnapshot::revised`], [`OrderDetailSnapshot::actioned`]),
//! so two references can never alias a half-updated record.

use serde::{Deserialize, Serialize};

use super::types::{OrderDetail, OrderDetailPatch, SnapshotStatus};

/// One immutable version of an order's details.
///
/// `sequence_id` is assigned by the snapshot store at append time and
/// is the single ordering key within an order. `created_at` is
/// informational: it serves timestamp-range queries only and must
/// never be used to order snapshots (sub-second collisions would
/// reorder history).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailSnapshot {
    /// Store-assigned, strictly increasing per order
    pub sequence_id: u64,
    #[serde(flatten)]
    pub detail: OrderDetail,
    pub status: SnapshotStatus,
    /// Unix millis, informational only
    pub created_at: i64,
    /// Employee who confirmed/rejected this snapshot, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl OrderDetailSnapshot {
    /// First snapshot of a new order. The sequence id is a placeholder
    /// until the store assigns the real one.
    pub fn first(detail: OrderDetail, status: SnapshotStatus) -> Self {
        Self {
            sequence_id: 0,
            detail,
            status,
            created_at: crate::util::now_millis(),
            employee_id: None,
        }
    }

    /// Derive a buyer revision: previous fields overridden by the
    /// patch, status forced back to PENDING, employee cleared.
    pub fn revised(&self, patch: &OrderDetailPatch) -> Self {
        Self {
            sequence_id: 0,
            detail: patch.apply(&self.detail),
            status: SnapshotStatus::Pending,
            created_at: crate::util::now_millis(),
            employee_id: None,
        }
    }

    /// Derive an employee action (confirm or reject): same fields, new
    /// status, actioning employee recorded.
    pub fn actioned(&self, status: SnapshotStatus, employee_id: impl Into<String>) -> Self {
        Self {
            sequence_id: 0,
            detail: self.detail.clone(),
            status,
            created_at: crate::util::now_millis(),
            employee_id: Some(employee_id.into()),
        }
    }
}

//! Versioning engine
//!
//! Derives the externally visible version numbering from an order's
//! snapshot chain and materializes history views. Version N is the N-th
//! CONFIRMED snapshot in ascending `sequence_id` order; pending and
//! rejected snapshots never consume a version number.
//!
//! Query dispatch priority: compare (`fromVersion` + `toVersion`), then
//! `version`, then `timestamp`, then full history.

use serde_json::{Value, json};
use shared::order::{
    BuyerSummary, FieldChange, FullHistory, HistoryQuery, HistoryView, OrderDetail,
    OrderDetailSnapshot, OrderRecord, SnapshotStatus, TimeTravelView, VersionDiff,
    VersionedSnapshot,
};

use crate::orders::error::{OrderError, OrderResult};

/// Resolve a history query against an order's full snapshot chain.
///
/// `snapshots` must contain every snapshot of the order; ordering on
/// input does not matter, the chain is re-sorted by `sequence_id` here.
pub fn resolve(
    order: &OrderRecord,
    buyer: BuyerSummary,
    mut snapshots: Vec<OrderDetailSnapshot>,
    query: &HistoryQuery,
) -> OrderResult<HistoryView> {
    snapshots.sort_by_key(|s| s.sequence_id);
    let confirmed = number_confirmed(&snapshots);

    if let (Some(from), Some(to)) = (query.from_version, query.to_version) {
        return compare(&confirmed, from, to).map(HistoryView::Compare);
    }

    if let Some(version) = query.version {
        return lookup(&confirmed, version).map(|v| HistoryView::Version(v.clone()));
    }

    if let Some(raw) = query.timestamp.as_deref() {
        return time_travel(&snapshots, raw).map(HistoryView::TimeTravel);
    }

    Ok(HistoryView::Full(FullHistory {
        order_id: order.order_id.clone(),
        buyer,
        current_status: order.order_status,
        total_versions: confirmed.len() as u32,
        history: confirmed,
    }))
}

/// Assign version numbers 1..N to the confirmed snapshots, in sequence order
fn number_confirmed(snapshots: &[OrderDetailSnapshot]) -> Vec<VersionedSnapshot> {
    snapshots
        .iter()
        .filter(|s| s.status == SnapshotStatus::Confirmed)
        .enumerate()
        .map(|(idx, snapshot)| VersionedSnapshot {
            version: idx as u32 + 1,
            snapshot: snapshot.clone(),
        })
        .collect()
}

fn lookup(confirmed: &[VersionedSnapshot], version: u32) -> OrderResult<&VersionedSnapshot> {
    let total = confirmed.len() as u32;
    if version == 0 || version > total {
        return Err(OrderError::Invalid(format!(
            "Version {version} does not exist. Available version: 1-{total}"
        )));
    }
    Ok(&confirmed[(version - 1) as usize])
}

fn compare(confirmed: &[VersionedSnapshot], from: u32, to: u32) -> OrderResult<VersionDiff> {
    let from_snapshot = lookup(confirmed, from)?.clone();
    let to_snapshot = lookup(confirmed, to)?.clone();

    let changes = diff_details(&from_snapshot.snapshot.detail, &to_snapshot.snapshot.detail);
    let changed_fields = changes.len();

    Ok(VersionDiff {
        from_version: from,
        to_version: to,
        from: from_snapshot,
        to: to_snapshot,
        changes,
        changed_fields,
    })
}

/// Field-by-field diff of two order details.
///
/// `difference` is attached only when both sides are numeric; changed
/// string fields appear without it.
pub fn diff_details(from: &OrderDetail, to: &OrderDetail) -> Vec<FieldChange> {
    let pairs: [(&'static str, Value, Value, Option<i64>); 6] = [
        (
            "productName",
            json!(from.product_name),
            json!(to.product_name),
            None,
        ),
        (
            "quantity",
            json!(from.quantity),
            json!(to.quantity),
            Some(to.quantity - from.quantity),
        ),
        (
            "unitPrice",
            json!(from.unit_price),
            json!(to.unit_price),
            Some(to.unit_price - from.unit_price),
        ),
        ("color", json!(from.color), json!(to.color), None),
        ("size", json!(from.size), json!(to.size), None),
        ("dueDate", json!(from.due_date), json!(to.due_date), None),
    ];

    pairs
        .into_iter()
        .filter(|(_, from_value, to_value, _)| from_value != to_value)
        .map(|(field, from_value, to_value, difference)| FieldChange {
            field,
            from: from_value,
            to: to_value,
            difference,
        })
        .collect()
}

fn time_travel(snapshots: &[OrderDetailSnapshot], raw: &str) -> OrderResult<TimeTravelView> {
    let target = parse_timestamp(raw)?;

    // Not filtered to confirmed snapshots: the view at a point in time
    // includes pending and rejected revisions.
    let selected = snapshots
        .iter()
        .filter(|s| s.created_at <= target)
        .next_back()
        .ok_or_else(|| {
            OrderError::NotFound(format!("No snapshot exists at or before timestamp {raw}"))
        })?;

    // The version in effect at that moment: confirmed snapshots up to
    // and including the selected one.
    let version = snapshots
        .iter()
        .filter(|s| s.sequence_id <= selected.sequence_id)
        .filter(|s| s.status == SnapshotStatus::Confirmed)
        .count() as u32;

    Ok(TimeTravelView {
        requested_timestamp: raw.to_string(),
        version,
        snapshot: selected.clone(),
    })
}

/// Parse a timestamp string into Unix millis.
///
/// Accepts Unix seconds (10 digits), Unix millis (13 digits) and
/// ISO-8601 date-times. A date-time without an offset is read as UTC.
pub fn parse_timestamp(raw: &str) -> OrderResult<i64> {
    let trimmed = raw.trim();

    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let parsed: i64 = trimmed
            .parse()
            .map_err(|_| OrderError::Invalid("Invalid timestamp format".to_string()))?;
        return match trimmed.len() {
            10 => Ok(parsed * 1000),
            13 => Ok(parsed),
            _ => Err(OrderError::Invalid("Invalid timestamp format".to_string())),
        };
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp_millis());
    }

    trimmed
        .parse::<chrono::NaiveDateTime>()
        .map(|dt| dt.and_utc().timestamp_millis())
        .map_err(|_| OrderError::Invalid("Invalid timestamp format".to_string()))
}

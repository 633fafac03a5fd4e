//! Order workflow state machine
//!
//! Governs the legal transitions of an order's snapshot chain:
//!
//! ```text
//! Create ──▶ PENDING ──confirm──▶ CONFIRMED ──buyer edit──▶ PENDING ...
//!                │
//!                └──reject──▶ REJECTED snapshot (header unchanged)
//! ```
//!
//! Every mutation runs its read-decide-write sequence inside one redb
//! write transaction. redb serializes write transactions, so two
//! concurrent operations on the same order can never both observe the
//! same latest snapshot and append conflicting successors.

use std::sync::Arc;

use tracing::info;

use shared::order::{
    BuyerSummary, HistoryQuery, HistoryView, OrderDetail, OrderDetailPatch, OrderDetailSnapshot,
    OrderRecord, OrderStatus, SnapshotStatus,
};

use crate::orders::directory::Directory;
use crate::orders::error::{OrderError, OrderResult};
use crate::orders::history;
use crate::orders::store::SnapshotStore;

/// The only department allowed to confirm or reject orders.
///
/// Checked here regardless of what the HTTP authorization layer already
/// enforced; ownership and department rules are not trusted from upstream.
pub const SOURCING_DEPARTMENT: &str = "S1";

/// Order workflow service: snapshot store + party directory
#[derive(Clone)]
pub struct OrderService {
    store: SnapshotStore,
    directory: Arc<dyn Directory>,
}

impl OrderService {
    pub fn new(store: SnapshotStore, directory: Arc<dyn Directory>) -> Self {
        Self { store, directory }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Create an order: header (status PENDING) plus its first snapshot,
    /// atomically.
    pub async fn create(
        &self,
        buyer_id: &str,
        detail: OrderDetail,
    ) -> OrderResult<(OrderRecord, OrderDetailSnapshot)> {
        self.require_buyer(buyer_id).await?;

        let record = OrderRecord::new(buyer_id);
        let txn = self.store.begin_write()?;
        self.store.store_order(&txn, &record)?;
        let snapshot = self.store.append_snapshot(
            &txn,
            &record.order_id,
            OrderDetailSnapshot::first(detail, SnapshotStatus::Pending),
        )?;
        txn.commit().map_err(crate::orders::store::StoreError::from)?;

        info!(order_id = %record.order_id, buyer_id = %buyer_id, "Order created");
        Ok((record, snapshot))
    }

    /// Buyer revision: appends a PENDING snapshot derived from the latest
    /// CONFIRMED one and moves the header back to PENDING.
    pub async fn update_by_buyer(
        &self,
        order_id: &str,
        buyer_id: &str,
        patch: &OrderDetailPatch,
    ) -> OrderResult<OrderDetailSnapshot> {
        if patch.is_empty() {
            return Err(OrderError::Invalid(
                "At least one field must be provided".to_string(),
            ));
        }
        self.require_buyer(buyer_id).await?;

        let txn = self.store.begin_write()?;
        let record = self
            .store
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id} not found")))?;
        if record.buyer_id != buyer_id {
            return Err(OrderError::Invalid("Order is not buyer's order".to_string()));
        }

        let latest = self.latest(&txn, order_id)?;
        if latest.status != SnapshotStatus::Confirmed {
            return Err(OrderError::NotFound(
                "Previous request is not in confirm state".to_string(),
            ));
        }

        let snapshot = self
            .store
            .append_snapshot(&txn, order_id, latest.revised(patch))?;
        self.store
            .set_order_status(&txn, order_id, OrderStatus::Pending)?;
        txn.commit().map_err(crate::orders::store::StoreError::from)?;

        info!(order_id = %order_id, sequence_id = snapshot.sequence_id, "Buyer revision appended");
        Ok(snapshot)
    }

    /// Sourcing approval: appends a CONFIRMED snapshot cloned from the
    /// latest PENDING one and moves the header to CONFIRMED.
    pub async fn confirm_by_employee(
        &self,
        order_id: &str,
        employee_id: &str,
    ) -> OrderResult<OrderDetailSnapshot> {
        self.require_pending(order_id)?;
        self.require_sourcing_employee(employee_id).await?;

        let txn = self.store.begin_write()?;
        let latest = self.latest(&txn, order_id)?;
        // Recheck under the write transaction
        if latest.status != SnapshotStatus::Pending {
            return Err(OrderError::NotFound(
                "Previous request is not in pending state".to_string(),
            ));
        }

        let snapshot = self.store.append_snapshot(
            &txn,
            order_id,
            latest.actioned(SnapshotStatus::Confirmed, employee_id),
        )?;
        self.store
            .set_order_status(&txn, order_id, OrderStatus::Confirmed)?;
        txn.commit().map_err(crate::orders::store::StoreError::from)?;

        info!(order_id = %order_id, employee_id = %employee_id, "Order confirmed");
        Ok(snapshot)
    }

    /// Sourcing rejection: appends a REJECTED snapshot cloned from the
    /// latest PENDING one. The header keeps its last confirmed or pending
    /// status so buyers can resubmit without losing the order-level view.
    pub async fn reject_by_employee(
        &self,
        order_id: &str,
        employee_id: &str,
    ) -> OrderResult<OrderDetailSnapshot> {
        self.require_pending(order_id)?;
        self.require_sourcing_employee(employee_id).await?;

        let txn = self.store.begin_write()?;
        let latest = self.latest(&txn, order_id)?;
        if latest.status != SnapshotStatus::Pending {
            return Err(OrderError::NotFound(
                "Previous request is not in pending state".to_string(),
            ));
        }

        let snapshot = self.store.append_snapshot(
            &txn,
            order_id,
            latest.actioned(SnapshotStatus::Rejected, employee_id),
        )?;
        txn.commit().map_err(crate::orders::store::StoreError::from)?;

        info!(order_id = %order_id, employee_id = %employee_id, "Order rejected");
        Ok(snapshot)
    }

    /// Resolve a history query for an order
    pub async fn history(&self, order_id: &str, query: &HistoryQuery) -> OrderResult<HistoryView> {
        let record = self
            .store
            .get_order(order_id)?
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id} not found")))?;

        let buyer = match self.directory.find_buyer(&record.buyer_id).await? {
            Some(buyer) => BuyerSummary {
                buyer_id: buyer.buyer_id,
                buyer_name: buyer.buyer_name,
            },
            None => BuyerSummary {
                buyer_id: record.buyer_id.clone(),
                buyer_name: record.buyer_id.clone(),
            },
        };

        let snapshots = self.store.get_snapshots(order_id)?;
        history::resolve(&record, buyer, snapshots, query)
    }

    /// All order headers, for listing endpoints
    pub fn list_orders(&self) -> OrderResult<Vec<OrderRecord>> {
        Ok(self.store.get_all_orders()?)
    }

    /// One order header
    pub fn get_order(&self, order_id: &str) -> OrderResult<OrderRecord> {
        self.store
            .get_order(order_id)?
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id} not found")))
    }

    // ========== Preconditions ==========

    async fn require_buyer(&self, buyer_id: &str) -> OrderResult<()> {
        self.directory
            .find_buyer(buyer_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Buyer {buyer_id} not found")))?;
        Ok(())
    }

    async fn require_sourcing_employee(&self, employee_id: &str) -> OrderResult<()> {
        let employee = self
            .directory
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Employee {employee_id} not found")))?;

        if employee.department_code.as_deref() != Some(SOURCING_DEPARTMENT) {
            return Err(OrderError::Invalid(
                "Department is not sourcing team".to_string(),
            ));
        }
        Ok(())
    }

    /// Pre-flight check that the order exists and its latest snapshot is
    /// PENDING, so the order/state failure is reported before the
    /// employee checks run. Rechecked under the write transaction.
    fn require_pending(&self, order_id: &str) -> OrderResult<()> {
        self.store
            .get_order(order_id)?
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id} not found")))?;

        let latest = self
            .store
            .get_snapshots(order_id)?
            .into_iter()
            .next_back()
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id} has no snapshots")))?;
        if latest.status != SnapshotStatus::Pending {
            return Err(OrderError::NotFound(
                "Previous request is not in pending state".to_string(),
            ));
        }
        Ok(())
    }

    /// Latest snapshot by sequence id within a write transaction
    fn latest(
        &self,
        txn: &redb::WriteTransaction,
        order_id: &str,
    ) -> OrderResult<OrderDetailSnapshot> {
        self.store
            .latest_snapshot_txn(txn, order_id)?
            .ok_or_else(|| OrderError::NotFound(format!("Order {order_id} has no snapshots")))
    }
}

//! redb-based storage layer for order snapshot versioning
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `OrderRecord` | Order headers |
//! | `snapshots` | `(order_id, sequence_id)` | `OrderDetailSnapshot` | Append-only snapshot chain |
//! | `sequence_counter` | `"seq"` | `u64` | Global sequence |
//!
//! # Append-only contract
//!
//! Snapshots are never updated or deleted. Every revision, confirmation and
//! rejection appends a new row keyed by a fresh sequence number allocated
//! inside the same write transaction, so the chain for an order is totally
//! ordered by `sequence_id` regardless of wall-clock timestamps.
//!
//! # Durability
//!
//! redb uses `Durability::Immediate` by default: commits are persistent as
//! soon as `commit()` returns, and the database file is always in a
//! consistent state thanks to copy-on-write with atomic pointer swap.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::order::{OrderDetailSnapshot, OrderRecord, OrderStatus};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for order headers: key = order_id, value = JSON-serialized OrderRecord
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Table for snapshots: key = (order_id, sequence_id), value = JSON-serialized OrderDetailSnapshot
const SNAPSHOTS_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("snapshots");

/// Table for sequence counter: key = "seq", value = u64
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const SEQUENCE_KEY: &str = "seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Order snapshot store backed by redb
#[derive(Clone)]
pub struct SnapshotStore {
    db: Arc<Database>,
}

impl SnapshotStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(SEQUENCE_KEY)?.is_none() {
                seq_table.insert(SEQUENCE_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Sequence Operations ==========

    /// Increment and return the sequence number (within transaction)
    fn increment_sequence(&self, txn: &WriteTransaction) -> StoreResult<u64> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table
            .get(SEQUENCE_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(SEQUENCE_KEY, next)?;
        Ok(next)
    }

    /// Get current sequence (read-only)
    pub fn current_sequence(&self) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEQUENCE_TABLE)?;
        Ok(table
            .get(SEQUENCE_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    // ========== Order Header Operations ==========

    /// Store an order header (insert or overwrite, within transaction)
    pub fn store_order(&self, txn: &WriteTransaction, record: &OrderRecord) -> StoreResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(record)?;
        table.insert(record.order_id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get an order header by ID
    pub fn get_order(&self, order_id: &str) -> StoreResult<Option<OrderRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => {
                let record: OrderRecord = serde_json::from_slice(value.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Get an order header by ID (within transaction)
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StoreResult<Option<OrderRecord>> {
        let table = txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => {
                let record: OrderRecord = serde_json::from_slice(value.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Update the status of an existing order header (within transaction)
    pub fn set_order_status(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
        status: OrderStatus,
    ) -> StoreResult<()> {
        let mut record = self
            .get_order_txn(txn, order_id)?
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;
        record.order_status = status;
        self.store_order(txn, &record)
    }

    /// Get all order headers
    pub fn get_all_orders(&self) -> StoreResult<Vec<OrderRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut records = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let record: OrderRecord = serde_json::from_slice(value.value())?;
            records.push(record);
        }

        Ok(records)
    }

    // ========== Snapshot Operations ==========

    /// Append a snapshot to an order's chain (within transaction)
    ///
    /// The order header must already exist in the same transaction.
    /// Allocates the next sequence number inside the transaction and returns
    /// the stored snapshot with `sequence_id` assigned. Existing rows are
    /// never touched.
    pub fn append_snapshot(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
        mut snapshot: OrderDetailSnapshot,
    ) -> StoreResult<OrderDetailSnapshot> {
        if self.get_order_txn(txn, order_id)?.is_none() {
            return Err(StoreError::OrderNotFound(order_id.to_string()));
        }
        snapshot.sequence_id = self.increment_sequence(txn)?;

        let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
        let key = (order_id, snapshot.sequence_id);
        let value = serde_json::to_vec(&snapshot)?;
        table.insert(key, value.as_slice())?;
        Ok(snapshot)
    }

    /// Get all snapshots for an order, ascending by sequence
    pub fn get_snapshots(&self, order_id: &str) -> StoreResult<Vec<OrderDetailSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;

        let mut snapshots = Vec::new();
        let range_start = (order_id, 0u64);
        let range_end = (order_id, u64::MAX);

        for result in table.range(range_start..=range_end)? {
            let (_key, value) = result?;
            let snapshot: OrderDetailSnapshot = serde_json::from_slice(value.value())?;
            snapshots.push(snapshot);
        }

        snapshots.sort_by_key(|s| s.sequence_id);
        Ok(snapshots)
    }

    /// Get all snapshots for an order (within transaction), ascending by sequence
    pub fn get_snapshots_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StoreResult<Vec<OrderDetailSnapshot>> {
        let table = txn.open_table(SNAPSHOTS_TABLE)?;

        let mut snapshots = Vec::new();
        let range_start = (order_id, 0u64);
        let range_end = (order_id, u64::MAX);

        for result in table.range(range_start..=range_end)? {
            let (_key, value) = result?;
            let snapshot: OrderDetailSnapshot = serde_json::from_slice(value.value())?;
            snapshots.push(snapshot);
        }

        snapshots.sort_by_key(|s| s.sequence_id);
        Ok(snapshots)
    }

    /// Get the latest snapshot for an order (within transaction)
    pub fn latest_snapshot_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StoreResult<Option<OrderDetailSnapshot>> {
        Ok(self.get_snapshots_txn(txn, order_id)?.into_iter().last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderDetail, SnapshotStatus};

    fn seed_order(store: &SnapshotStore, txn: &WriteTransaction, order_id: &str) {
        let mut record = OrderRecord::new("buyer-1");
        record.order_id = order_id.to_string();
        store.store_order(txn, &record).unwrap();
    }

    fn test_detail(name: &str) -> OrderDetail {
        OrderDetail {
            product_name: name.to_string(),
            quantity: 100,
            unit_price: 250,
            color: "navy".to_string(),
            size: "M".to_string(),
            due_date: "20261224".to_string(),
        }
    }

    #[test]
    fn sequence_increments_across_transactions() {
        let store = SnapshotStore::open_in_memory().unwrap();
        assert_eq!(store.current_sequence().unwrap(), 0);

        let txn = store.begin_write().unwrap();
        let seq1 = store.increment_sequence(&txn).unwrap();
        txn.commit().unwrap();
        assert_eq!(seq1, 1);

        let txn = store.begin_write().unwrap();
        let seq2 = store.increment_sequence(&txn).unwrap();
        txn.commit().unwrap();
        assert_eq!(seq2, 2);

        assert_eq!(store.current_sequence().unwrap(), 2);
    }

    #[test]
    fn order_header_roundtrip() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let record = OrderRecord::new("buyer-1".to_string());

        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &record).unwrap();
        txn.commit().unwrap();

        let loaded = store.get_order(&record.order_id).unwrap().unwrap();
        assert_eq!(loaded.order_id, record.order_id);
        assert_eq!(loaded.buyer_id, "buyer-1");
        assert_eq!(loaded.order_status, OrderStatus::Pending);
    }

    #[test]
    fn set_status_requires_existing_order() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        let err = store
            .set_order_status(&txn, "missing", OrderStatus::Confirmed)
            .unwrap_err();
        assert!(matches!(err, StoreError::OrderNotFound(_)));
    }

    #[test]
    fn append_requires_existing_header() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        let err = store
            .append_snapshot(
                &txn,
                "missing",
                OrderDetailSnapshot::first(test_detail("hoodie"), SnapshotStatus::Pending),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::OrderNotFound(_)));
    }

    #[test]
    fn append_assigns_increasing_sequence_ids() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let order_id = "order-1";

        let txn = store.begin_write().unwrap();
        seed_order(&store, &txn, order_id);
        let s1 = store
            .append_snapshot(
                &txn,
                order_id,
                OrderDetailSnapshot::first(test_detail("hoodie"), SnapshotStatus::Pending),
            )
            .unwrap();
        let s2 = store
            .append_snapshot(
                &txn,
                order_id,
                OrderDetailSnapshot::first(test_detail("hoodie"), SnapshotStatus::Confirmed),
            )
            .unwrap();
        txn.commit().unwrap();

        assert!(s2.sequence_id > s1.sequence_id);

        let snapshots = store.get_snapshots(order_id).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].sequence_id, s1.sequence_id);
        assert_eq!(snapshots[1].sequence_id, s2.sequence_id);
    }

    #[test]
    fn snapshots_isolated_per_order() {
        let store = SnapshotStore::open_in_memory().unwrap();

        let txn = store.begin_write().unwrap();
        seed_order(&store, &txn, "order-a");
        seed_order(&store, &txn, "order-b");
        store
            .append_snapshot(
                &txn,
                "order-a",
                OrderDetailSnapshot::first(test_detail("shirt"), SnapshotStatus::Pending),
            )
            .unwrap();
        store
            .append_snapshot(
                &txn,
                "order-b",
                OrderDetailSnapshot::first(test_detail("jacket"), SnapshotStatus::Pending),
            )
            .unwrap();
        store
            .append_snapshot(
                &txn,
                "order-a",
                OrderDetailSnapshot::first(test_detail("shirt"), SnapshotStatus::Confirmed),
            )
            .unwrap();
        txn.commit().unwrap();

        let a = store.get_snapshots("order-a").unwrap();
        let b = store.get_snapshots("order-b").unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].detail.product_name, "jacket");
    }

    #[test]
    fn latest_snapshot_is_highest_sequence() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let order_id = "order-latest";

        let txn = store.begin_write().unwrap();
        seed_order(&store, &txn, order_id);
        store
            .append_snapshot(
                &txn,
                order_id,
                OrderDetailSnapshot::first(test_detail("v1"), SnapshotStatus::Confirmed),
            )
            .unwrap();
        let last = store
            .append_snapshot(
                &txn,
                order_id,
                OrderDetailSnapshot::first(test_detail("v2"), SnapshotStatus::Pending),
            )
            .unwrap();

        let latest = store.latest_snapshot_txn(&txn, order_id).unwrap().unwrap();
        assert_eq!(latest.sequence_id, last.sequence_id);
        assert_eq!(latest.detail.product_name, "v2");
        txn.commit().unwrap();
    }
}

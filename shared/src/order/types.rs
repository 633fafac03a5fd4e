//! Shared enums and value types for the order workflow

use serde::{Deserialize, Serialize};

// ============================================================================
// Status Enums
// ============================================================================

/// Wire code that maps to no known status variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnknownStatusCode {
    #[error("unknown order status code: {0}")]
    Order(u8),
    #[error("unknown snapshot status code: {0}")]
    Snapshot(u8),
}

/// Order header status, serialized as its integer code on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum OrderStatus {
    Draft = 1,
    #[default]
    Pending = 2,
    Confirmed = 3,
    InProduction = 4,
    Completed = 5,
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(OrderStatus::Draft),
            2 => Ok(OrderStatus::Pending),
            3 => Ok(OrderStatus::Confirmed),
            4 => Ok(OrderStatus::InProduction),
            5 => Ok(OrderStatus::Completed),
            other => Err(UnknownStatusCode::Order(other)),
        }
    }
}

/// Snapshot status, serialized as its integer code on the wire
///
/// REJECTED deliberately shares no code with `OrderStatus`: a rejected
/// snapshot terminates one revision cycle without touching the header.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum SnapshotStatus {
    #[default]
    Pending = 2,
    Confirmed = 3,
    Rejected = 9,
}

impl From<SnapshotStatus> for u8 {
    fn from(status: SnapshotStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for SnapshotStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            2 => Ok(SnapshotStatus::Pending),
            3 => Ok(SnapshotStatus::Confirmed),
            9 => Ok(SnapshotStatus::Rejected),
            other => Err(UnknownStatusCode::Snapshot(other)),
        }
    }
}

// ============================================================================
// Order Header
// ============================================================================

/// Order header row, the only mutable part of an order, and only its
/// `order_status` field is ever rewritten (by the workflow).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: String,
    pub order_status: OrderStatus,
    pub buyer_id: String,
    pub created_at: i64,
}

impl OrderRecord {
    pub fn new(buyer_id: impl Into<String>) -> Self {
        Self {
            order_id: crate::util::new_id(),
            order_status: OrderStatus::Pending,
            buyer_id: buyer_id.into(),
            created_at: crate::util::now_millis(),
        }
    }
}

// ============================================================================
// Order Detail
// ============================================================================

/// Line-item fields of one order revision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub color: String,
    pub size: String,
    /// Due date as YYYYMMDD
    pub due_date: String,
}

/// Partial update to an [`OrderDetail`], every field independently
/// overridable
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl OrderDetailPatch {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.quantity.is_none()
            && self.unit_price.is_none()
            && self.color.is_none()
            && self.size.is_none()
            && self.due_date.is_none()
    }

    /// Base detail overridden by the present fields of this patch
    pub fn apply(&self, base: &OrderDetail) -> OrderDetail {
        OrderDetail {
            product_name: self
                .product_name
                .clone()
                .unwrap_or_else(|| base.product_name.clone()),
            quantity: self.quantity.unwrap_or(base.quantity),
            unit_price: self.unit_price.unwrap_or(base.unit_price),
            color: self.color.clone().unwrap_or_else(|| base.color.clone()),
            size: self.size.clone().unwrap_or_else(|| base.size.clone()),
            due_date: self
                .due_date
                .clone()
                .unwrap_or_else(|| base.due_date.clone()),
        }
    }
}

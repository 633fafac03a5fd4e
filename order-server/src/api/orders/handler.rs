//! Orders API Handlers
//!
//! Thin HTTP shell over the order workflow. The caller identity comes
//! from the JWT; ownership and department rules are enforced again
//! inside the workflow.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::order::{
    HistoryQuery, HistoryView, OrderDetail, OrderDetailPatch, OrderDetailSnapshot, OrderRecord,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_payload, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Order creation payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 200))]
    pub product_name: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[validate(range(min = 1))]
    pub unit_price: i64,
    #[validate(length(min = 1, max = 100))]
    pub color: String,
    #[validate(length(min = 1, max = 100))]
    pub size: String,
    /// YYYYMMDD
    #[validate(length(equal = 8))]
    pub due_date: String,
}

impl From<CreateOrderRequest> for OrderDetail {
    fn from(req: CreateOrderRequest) -> Self {
        OrderDetail {
            product_name: req.product_name,
            quantity: req.quantity,
            unit_price: req.unit_price,
            color: req.color,
            size: req.size,
            due_date: req.due_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    #[serde(flatten)]
    pub order: OrderRecord,
    pub snapshot: OrderDetailSnapshot,
}

/// List orders: buyers see their own, employees see all
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<OrderRecord>>>> {
    let mut orders = state.orders().list_orders()?;
    if user.is_buyer() {
        orders.retain(|o| o.buyer_id == user.id);
    }
    Ok(ok(orders))
}

/// Create an order for the authenticated buyer
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<OrderCreatedResponse>>> {
    validate_payload(&payload)?;

    let (order, snapshot) = state.orders().create(&user.id, payload.into()).await?;
    Ok(ok(OrderCreatedResponse { order, snapshot }))
}

/// Buyer revision of an order's details
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(patch): Json<OrderDetailPatch>,
) -> AppResult<Json<AppResponse<OrderDetailSnapshot>>> {
    validate_patch(&patch)?;

    let snapshot = state.orders().update_by_buyer(&id, &user.id, &patch).await?;
    Ok(ok(snapshot))
}

/// Patched text fields must stay within the same limits as creation
fn validate_patch(patch: &OrderDetailPatch) -> Result<(), AppError> {
    if let Some(name) = patch.product_name.as_deref() {
        validate_required_text(name, "productName", MAX_NAME_LEN)?;
    }
    if let Some(color) = patch.color.as_deref() {
        validate_required_text(color, "color", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(size) = patch.size.as_deref() {
        validate_required_text(size, "size", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

/// Confirm the latest pending revision
pub async fn confirm(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDetailSnapshot>>> {
    if !user.is_employee() {
        return Err(AppError::forbidden("Employee account required".to_string()));
    }
    let snapshot = state.orders().confirm_by_employee(&id, &user.id).await?;
    Ok(ok(snapshot))
}

/// Reject the latest pending revision
pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDetailSnapshot>>> {
    if !user.is_employee() {
        return Err(AppError::forbidden("Employee account required".to_string()));
    }
    let snapshot = state.orders().reject_by_employee(&id, &user.id).await?;
    Ok(ok(snapshot))
}

/// Order history: full, by version, by timestamp, or version comparison
pub async fn history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<AppResponse<HistoryView>>> {
    let view = state.orders().history(&id, &query).await?;
    Ok(ok(view))
}

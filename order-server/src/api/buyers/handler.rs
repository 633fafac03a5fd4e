//! Buyer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Buyer, BuyerUpdate};
use crate::db::repository::BuyerRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation::validate_payload};

/// List all buyers
///
/// `Buyer` skips `hash_pass` on serialize, so the model is safe to return.
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Buyer>>>> {
    let repo = BuyerRepository::new(state.get_db());
    let buyers = repo.find_all().await?;
    Ok(ok(buyers))
}

/// Get buyer by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Buyer>>> {
    let repo = BuyerRepository::new(state.get_db());
    let buyer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Buyer {id} not found")))?;
    Ok(ok(buyer))
}

/// Update a buyer profile (the buyer themself, or an admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<BuyerUpdate>,
) -> AppResult<Json<AppResponse<Buyer>>> {
    if !user.is_admin() && !(user.is_buyer() && user.id == id) {
        return Err(AppError::forbidden("Cannot modify another buyer".to_string()));
    }
    validate_payload(&payload)?;

    let repo = BuyerRepository::new(state.get_db());
    let buyer = repo.update(&id, payload).await?;
    Ok(ok(buyer))
}

/// Delete a buyer (admin only, enforced by the route layer)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let repo = BuyerRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok(serde_json::json!({ "deleted": id })))
}

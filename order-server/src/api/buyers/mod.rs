//! Buyer API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role;
use crate::core::ServerState;

/// Buyer router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/buyers", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id).put(handler::update));

    // 删除仅限管理员；资料更新在 handler 内校验本人或管理员
    let manage_routes = Router::new()
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_role("admin")));

    read_routes.merge(manage_routes)
}

//! Department API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_role;
use crate::core::ServerState;

/// Department router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/departments", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{code}", get(handler::get_by_code));

    // 管理路由：仅管理员可用
    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{code}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role("admin")));

    read_routes.merge(manage_routes)
}

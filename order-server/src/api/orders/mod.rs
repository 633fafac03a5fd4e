//! Orders API Module
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 授权 |
//! |------|------|------|------|
//! | /api/orders | GET | 订单列表 | 登录用户 |
//! | /api/orders | POST | 创建订单 | 买家 |
//! | /api/orders/{id} | GET | 历史查询 (version/timestamp/compare) | 登录用户 |
//! | /api/orders/{id} | PATCH | 买家修订 | 买家 |
//! | /api/orders/{id}/confirm | POST | 采购确认 | approve_order |
//! | /api/orders/{id}/reject | POST | 采购驳回 | reject_order |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{require_buyer, require_role};
use crate::core::ServerState;

/// Orders router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::history));

    // 买家路由：创建与修订
    let buyer_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", patch(handler::update))
        .layer(middleware::from_fn(require_buyer));

    // 员工路由：确认与驳回 (工作流内还会再校验 S1 部门)
    let confirm_routes = Router::new()
        .route("/{id}/confirm", post(handler::confirm))
        .layer(middleware::from_fn(require_role("approve_order")));
    let reject_routes = Router::new()
        .route("/{id}/reject", post(handler::reject))
        .layer(middleware::from_fn(require_role("reject_order")));

    read_routes
        .merge(buyer_routes)
        .merge(confirm_routes)
        .merge(reject_routes)
}

//! Auth API Module
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/auth/buyer/signup | POST | 买家注册 |
//! | /api/auth/buyer/signin | POST | 买家登录 |
//! | /api/auth/employee/signup | POST | 员工注册 |
//! | /api/auth/employee/signin | POST | 员工登录 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Auth router - public routes (skipped by the auth middleware)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/buyer/signup", post(handler::buyer_signup))
        .route("/buyer/signin", post(handler::buyer_signin))
        .route("/employee/signup", post(handler::employee_signup))
        .route("/employee/signin", post(handler::employee_signin))
}

//! 认证授权模块
//!
//! 提供 JWT 认证、角色管理和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件
//! - [`require_role`] - 角色检查中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod roles;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, UserType};
pub use middleware::{require_auth, require_buyer, require_role};
pub use roles::{BUYER_ROLE, roles_for_department};

//! 认证模块 - JWT + Argon2 认证体系
//!
//! - [`JwtService`] - 令牌生成和验证
//! - [`require_admin`] - 管理员路由认证中间件
//! - [`CurrentUser`] - 已认证的管理员上下文

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;

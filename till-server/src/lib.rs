//! Till Server - 零售门店收银后端
//!
//! # 架构概述
//!
//! 本模块是 Till Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): PostgreSQL 存储 (sqlx 连接池 + 迁移)
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! till-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! └── utils/         # 错误、日志、验证工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置环境 (dotenv + 日志)
///
/// 必须在 [`Config::from_env`] 之前调用
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(None, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  _______ ____
 /_  __(_) / /
  / / / / / /
 / / / / / /
/_/ /_/_/_/
    "#
    );
}

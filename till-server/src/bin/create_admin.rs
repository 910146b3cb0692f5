//! 管理员账号初始化工具
//!
//! 用法:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/till create-admin [username] [password]
//! ```
//!
//! 未提供参数时使用 DEFAULT_ADMIN_USERNAME / DEFAULT_ADMIN_PASSWORD
//! 环境变量 (默认 admin / admin123)。重复执行会覆盖已有密码。

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use till_server::db::models::Admin;
use till_server::db::repository::AdminRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    till_server::init_logger();

    let mut args = std::env::args().skip(1);
    let username = args
        .next()
        .or_else(|| std::env::var("DEFAULT_ADMIN_USERNAME").ok())
        .unwrap_or_else(|| "admin".to_string());
    let password = args
        .next()
        .or_else(|| std::env::var("DEFAULT_ADMIN_PASSWORD").ok())
        .unwrap_or_else(|| "admin123".to_string());

    let database_url = std::env::var("DATABASE_URL")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    // Idempotent: makes the tool usable against a fresh database
    sqlx::migrate!("./migrations").run(&pool).await?;

    let password_hash =
        Admin::hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    let repo = AdminRepository::new(pool.clone());
    let admin = repo
        .upsert(&username, &password_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create admin: {e}"))?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Admin credential saved");
    tracing::warn!("Please change the password after logging in.");

    pool.close().await;
    Ok(())
}

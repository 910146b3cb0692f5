//! Admin Repository

use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::Admin;

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by exact username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    /// Insert or update an admin credential (used by the create-admin tool)
    pub async fn upsert(&self, username: &str, password_hash: &str) -> RepoResult<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE
            SET password_hash = EXCLUDED.password_hash
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(admin)
    }
}

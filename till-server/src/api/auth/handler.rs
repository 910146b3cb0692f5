//! Authentication Handlers
//!
//! Handles admin login and token issuance

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::core::ServerState;
use crate::db::repository::AdminRepository;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

/// POST /api/auth/login
///
/// Authenticates admin credentials and returns a JWT token.
/// Unknown username and wrong password produce the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = req.username.trim().to_string();

    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::validation(
            "Username and password are required.",
        ));
    }

    let repo = AdminRepository::new(state.get_db());
    let admin = repo.find_by_username(&username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error to prevent username enumeration
    let admin = match admin {
        Some(admin) => {
            let password_valid = admin
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(username = %username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            admin
        }
        None => {
            tracing::warn!(username = %username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(&admin.id.to_string(), &admin.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        admin_id = admin.id,
        username = %admin.username,
        "Admin logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        admin: AdminInfo {
            id: admin.id,
            username: admin.username,
        },
    }))
}

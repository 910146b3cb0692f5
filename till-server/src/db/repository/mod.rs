//! Repository Module
//!
//! Provides CRUD operations for the PostgreSQL tables. Each repository owns a
//! cloned pool handle and exposes focused async methods; the billing
//! repository additionally owns the transactional sale path.

pub mod admin;
pub mod analytics;
pub mod bill;
pub mod product;
pub mod stock_update;

pub use admin::AdminRepository;
pub use analytics::AnalyticsRepository;
pub use bill::BillRepository;
pub use product::ProductRepository;
pub use stock_update::StockUpdateRepository;

use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Insufficient stock for {name}. Only {available} left.")]
    InsufficientStock { name: String, available: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Conflict(msg) => AppError::conflict(msg),
            e @ RepoError::InsufficientStock { .. } => AppError::conflict(e.to_string()),
            RepoError::Database(e) => AppError::database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = RepoError::InsufficientStock {
            name: "Dog Food".to_string(),
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Dog Food. Only 2 left."
        );
    }

    #[test]
    fn test_repo_error_maps_to_app_error() {
        let app: AppError = RepoError::NotFound("Product not found".to_string()).into();
        assert!(matches!(app, AppError::NotFound(msg) if msg == "Product not found"));

        let app: AppError = RepoError::InsufficientStock {
            name: "Dog Food".to_string(),
            available: 2,
        }
        .into();
        assert!(matches!(app, AppError::Conflict(_)));
    }
}

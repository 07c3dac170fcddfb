// ABOUTME: Shared storage error taxonomy for Samrat CRM
// ABOUTME: Hosts the SQL migrations consumed by every storage layer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Payload too large: {size} bytes exceeds limit of {limit}")]
    PayloadTooLarge { size: u64, limit: u64 },
}

impl StorageError {
    /// Whether the error maps to a missing-record condition
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::NotFound | StorageError::Sqlx(sqlx::Error::RowNotFound)
        )
    }
}

// ABOUTME: File metadata storage layer using SQLite
// ABOUTME: Pointer rows recorded after each successful blob write

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::types::FileRecord;
use samrat_storage::StorageError;

pub struct FileStorage {
    pool: SqlitePool,
}

impl FileStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a pointer row for a blob already written to the blob store
    pub async fn create_file(
        &self,
        customer_id: &str,
        name: &str,
        file_path: &str,
        size: &str,
    ) -> Result<FileRecord, StorageError> {
        let file_id = nanoid::nanoid!();
        let now = Utc::now();

        debug!("Recording file: {} for customer: {}", name, customer_id);

        sqlx::query(
            r#"
            INSERT INTO files (id, customer_id, name, file_path, size, uploaded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&file_id)
        .bind(customer_id)
        .bind(name)
        .bind(file_path)
        .bind(size)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get_file(&file_id).await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<FileRecord, StorageError> {
        debug!("Fetching file: {}", file_id);

        let row = sqlx::query("SELECT * FROM files WHERE id = ?")
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_file(&row)
    }

    /// All files for one customer, newest first
    pub async fn list_files(&self, customer_id: &str) -> Result<Vec<FileRecord>, StorageError> {
        debug!("Fetching files for customer: {}", customer_id);

        let rows = sqlx::query(
            r#"
            SELECT * FROM files
            WHERE customer_id = ?
            ORDER BY uploaded_at DESC, rowid DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_file).collect()
    }

    pub async fn count_files(&self, customer_id: &str) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE customer_id = ?")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(count)
    }
}

fn row_to_file(row: &sqlx::sqlite::SqliteRow) -> Result<FileRecord, StorageError> {
    Ok(FileRecord {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        name: row.try_get("name")?,
        file_path: row.try_get("file_path")?,
        size: row.try_get("size")?,
        uploaded_at: row.try_get("uploaded_at")?,
    })
}

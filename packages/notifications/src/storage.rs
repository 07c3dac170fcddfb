// ABOUTME: Notification storage layer using SQLite
// ABOUTME: Scoped listing and the single in-place mutation (mark read)

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::types::{Notification, NotificationCreateInput, NotificationKind};
use samrat_storage::StorageError;

pub struct NotificationStorage {
    pool: SqlitePool,
}

impl NotificationStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_notification(
        &self,
        input: NotificationCreateInput,
    ) -> Result<Notification, StorageError> {
        let notification_id = nanoid::nanoid!();
        let now = Utc::now();

        debug!(
            "Creating notification: {} (scope: {:?})",
            notification_id, input.user_id
        );

        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, title, message, kind, is_read, created_at)
            VALUES (?, ?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(&notification_id)
        .bind(&input.user_id)
        .bind(&input.title)
        .bind(&input.message)
        .bind(input.kind.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get_notification(&notification_id).await
    }

    pub async fn get_notification(
        &self,
        notification_id: &str,
    ) -> Result<Notification, StorageError> {
        let row = sqlx::query("SELECT * FROM notifications WHERE id = ?")
            .bind(notification_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_notification(&row)
    }

    /// Entries scoped to the given profile plus global entries, newest first
    pub async fn list_for_profile(
        &self,
        profile_id: &str,
    ) -> Result<Vec<Notification>, StorageError> {
        debug!("Fetching notifications for profile: {}", profile_id);

        let rows = sqlx::query(
            r#"
            SELECT * FROM notifications
            WHERE user_id = ? OR user_id IS NULL
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_notification).collect()
    }

    /// Flip `is_read`; the only in-place mutation notifications support
    pub async fn mark_read(&self, notification_id: &str) -> Result<(), StorageError> {
        debug!("Marking notification read: {}", notification_id);

        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(notification_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

fn row_to_notification(row: &sqlx::sqlite::SqliteRow) -> Result<Notification, StorageError> {
    let kind: String = row.try_get("kind")?;
    Ok(Notification {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        message: row.try_get("message")?,
        kind: NotificationKind::parse(&kind),
        is_read: row.try_get::<i64, _>("is_read")? != 0,
        created_at: row.try_get("created_at")?,
    })
}

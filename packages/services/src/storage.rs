// ABOUTME: Service update storage layer using SQLite
// ABOUTME: Append-only writes with ordered reads for timeline and aggregation

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::types::{ServiceUpdate, ServiceUpdateCreateInput};
use samrat_storage::StorageError;

pub struct ServiceUpdateStorage {
    pool: SqlitePool,
}

impl ServiceUpdateStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Timeline view, newest first
    pub async fn list_updates_paginated(
        &self,
        customer_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ServiceUpdate>, i64), StorageError> {
        debug!(
            "Fetching updates for customer: {} (limit: {}, offset: {})",
            customer_id, limit, offset
        );

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM service_updates WHERE customer_id = ?")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        let rows = sqlx::query(
            r#"
            SELECT * FROM service_updates
            WHERE customer_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let updates = rows
            .iter()
            .map(row_to_update)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((updates, count))
    }

    /// All updates for one customer in insertion order (oldest first, rowid
    /// breaking timestamp ties), the order the progress aggregator expects so
    /// that latest-inserted rows win ties.
    pub async fn list_updates_for_aggregation(
        &self,
        customer_id: &str,
    ) -> Result<Vec<ServiceUpdate>, StorageError> {
        debug!("Fetching updates for aggregation: {}", customer_id);

        let rows = sqlx::query(
            r#"
            SELECT * FROM service_updates
            WHERE customer_id = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_update).collect()
    }

    /// Append a new update row. Existing rows are never mutated.
    pub async fn create_update(
        &self,
        customer_id: &str,
        input: ServiceUpdateCreateInput,
    ) -> Result<ServiceUpdate, StorageError> {
        if !(0..=100).contains(&input.progress) {
            return Err(StorageError::InvalidValue(format!(
                "progress must be within [0, 100], got {}",
                input.progress
            )));
        }

        let update_id = nanoid::nanoid!();
        let now = Utc::now();

        debug!(
            "Creating update: {} for customer: {} ({} at {}%)",
            update_id, customer_id, input.service, input.progress
        );

        sqlx::query(
            r#"
            INSERT INTO service_updates (
                id, customer_id, service, title, description, progress, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&update_id)
        .bind(customer_id)
        .bind(&input.service)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.progress)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let row = sqlx::query("SELECT * FROM service_updates WHERE id = ?")
            .bind(&update_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row_to_update(&row)
    }

    /// Update counts per service name across all customers, for the admin
    /// analytics charts
    pub async fn counts_per_service(&self) -> Result<Vec<(String, i64)>, StorageError> {
        debug!("Counting updates per service");

        let rows = sqlx::query(
            r#"
            SELECT service, COUNT(*) as count
            FROM service_updates
            GROUP BY service
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| {
                Ok((
                    row.try_get::<String, _>("service")?,
                    row.try_get::<i64, _>("count")?,
                ))
            })
            .collect()
    }
}

fn row_to_update(row: &sqlx::sqlite::SqliteRow) -> Result<ServiceUpdate, StorageError> {
    Ok(ServiceUpdate {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        service: row.try_get("service")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        progress: row.try_get("progress")?,
        created_at: row.try_get("created_at")?,
    })
}

// ABOUTME: Profile storage layer using SQLite
// ABOUTME: Handles CRUD operations and aggregate counts for account records

use chrono::Utc;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::types::{AccountStatus, Membership, Profile, ProfileCreateInput, ProfileUpdateInput};
use samrat_storage::StorageError;

pub struct ProfileStorage {
    pool: SqlitePool,
}

/// Aggregate counts for the admin dashboard header cards
#[derive(Debug, Clone, Serialize)]
pub struct MembershipStats {
    pub total: i64,
    pub active: i64,
    pub basic: i64,
    pub pro: i64,
    pub premium: i64,
}

impl ProfileStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_profiles_paginated(
        &self,
        role: Option<&str>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Profile>, i64), StorageError> {
        debug!(
            "Fetching profiles (role: {:?}, search: {:?}, limit: {}, offset: {})",
            role, search, limit, offset
        );

        let mut filter = String::from(" WHERE 1 = 1");
        if role.is_some() {
            filter.push_str(" AND role = ?");
        }
        if search.is_some() {
            filter.push_str(" AND (full_name LIKE ? OR email LIKE ?)");
        }

        let count_sql = format!("SELECT COUNT(*) FROM profiles{}", filter);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let pattern = search.map(|s| format!("%{}%", s));
        if let Some(role) = role {
            count_query = count_query.bind(role.to_string());
        }
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern.as_str()).bind(pattern.as_str());
        }
        let count = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let list_sql = format!(
            "SELECT * FROM profiles{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            filter
        );
        let mut list_query = sqlx::query(&list_sql);
        if let Some(role) = role {
            list_query = list_query.bind(role.to_string());
        }
        if let Some(pattern) = &pattern {
            list_query = list_query.bind(pattern.as_str()).bind(pattern.as_str());
        }
        let rows = list_query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let profiles = rows
            .iter()
            .map(row_to_profile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((profiles, count))
    }

    /// All customer accounts, newest first. Used by analytics rankings where
    /// pagination would skew the result.
    pub async fn list_customers(&self) -> Result<Vec<Profile>, StorageError> {
        debug!("Fetching all customer profiles");

        let rows = sqlx::query("SELECT * FROM profiles WHERE role = 'customer' ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_profile).collect()
    }

    pub async fn get_profile(&self, profile_id: &str) -> Result<Profile, StorageError> {
        debug!("Fetching profile: {}", profile_id);

        let row = sqlx::query("SELECT * FROM profiles WHERE id = ?")
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_profile(&row)
    }

    /// Insert a new account. The password hash is computed by the auth
    /// package; this layer stores it opaquely.
    pub async fn create_profile(
        &self,
        input: ProfileCreateInput,
        password_hash: &str,
    ) -> Result<Profile, StorageError> {
        let profile_id = nanoid::nanoid!();
        let now = Utc::now();
        let membership = input.membership.unwrap_or(Membership::Basic);

        debug!("Creating profile: {} ({})", profile_id, input.email);

        let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM profiles WHERE email = ?")
            .bind(&input.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        if existing.is_some() {
            return Err(StorageError::DuplicateEmail(input.email));
        }

        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, role, full_name, email, password_hash,
                membership, status, join_date, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile_id)
        .bind(&input.role)
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(password_hash)
        .bind(membership.as_str())
        .bind(AccountStatus::Active.as_str())
        .bind(now.format("%Y-%m-%d").to_string())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get_profile(&profile_id).await
    }

    /// Patch admin-mutable fields. Role is not updatable here.
    pub async fn update_profile(
        &self,
        profile_id: &str,
        input: ProfileUpdateInput,
    ) -> Result<Profile, StorageError> {
        debug!("Updating profile: {}", profile_id);

        let mut query = String::from("UPDATE profiles SET updated_at = ?");
        let mut has_updates = false;

        if input.full_name.is_some() {
            query.push_str(", full_name = ?");
            has_updates = true;
        }
        if input.membership.is_some() {
            query.push_str(", membership = ?");
            has_updates = true;
        }
        if input.status.is_some() {
            query.push_str(", status = ?");
            has_updates = true;
        }

        query.push_str(" WHERE id = ?");

        if !has_updates {
            return self.get_profile(profile_id).await;
        }

        let now = Utc::now();
        let mut q = sqlx::query(&query).bind(now);

        if let Some(full_name) = &input.full_name {
            q = q.bind(full_name);
        }
        if let Some(membership) = input.membership {
            q = q.bind(membership.as_str());
        }
        if let Some(status) = input.status {
            q = q.bind(status.as_str());
        }

        let result = q
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_profile(profile_id).await
    }

    pub async fn membership_stats(&self) -> Result<MembershipStats, StorageError> {
        debug!("Computing membership stats");

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE role = 'customer'")
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        let active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM profiles WHERE role = 'customer' AND status = 'Active'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let rows = sqlx::query(
            "SELECT membership, COUNT(*) as count FROM profiles WHERE role = 'customer' GROUP BY membership",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let mut stats = MembershipStats {
            total,
            active,
            basic: 0,
            pro: 0,
            premium: 0,
        };
        for row in rows {
            let membership: String = row.try_get("membership")?;
            let count: i64 = row.try_get("count")?;
            match Membership::parse(&membership) {
                Membership::Basic => stats.basic += count,
                Membership::Pro => stats.pro += count,
                Membership::Premium => stats.premium += count,
            }
        }

        Ok(stats)
    }
}

fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> Result<Profile, StorageError> {
    let membership: String = row.try_get("membership")?;
    let status: String = row.try_get("status")?;

    Ok(Profile {
        id: row.try_get("id")?,
        role: row.try_get("role")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        membership: Membership::parse(&membership),
        status: AccountStatus::parse(&status),
        join_date: row.try_get("join_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// ABOUTME: Session persistence: token generation, hashing, validation, revocation
// ABOUTME: Tokens are random 32-byte values; only their SHA-256 hex digest is stored

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::session::types::Session;

#[derive(Clone)]
pub struct SessionStorage {
    pool: SqlitePool,
}

impl SessionStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate a fresh bearer token: 32 random bytes, base64url without padding.
    pub fn generate_token() -> String {
        let bytes: [u8; 32] = rand::thread_rng().gen();
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// SHA-256 hex digest of a token, the only form persisted.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn hashes_match(a: &str, b: &str) -> bool {
        a.as_bytes().ct_eq(b.as_bytes()).into()
    }

    /// Create a session for a profile. Returns the session row together with
    /// the plaintext token, which is never stored and never retrievable again.
    pub async fn create_session(&self, profile_id: &str, ttl_hours: i64) -> AuthResult<(Session, String)> {
        let token = Self::generate_token();
        let token_hash = Self::hash_token(&token);
        let id = nanoid::nanoid!();
        let now = Utc::now();
        let expires_at = now + Duration::hours(ttl_hours);

        sqlx::query(
            r#"
            INSERT INTO sessions (id, profile_id, token_hash, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(profile_id)
        .bind(&token_hash)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        debug!("Created session {} for profile {}", id, profile_id);

        let session = Session {
            id,
            profile_id: profile_id.to_string(),
            token_hash,
            created_at: now,
            expires_at,
            revoked_at: None,
        };
        Ok((session, token))
    }

    /// Validate a bearer token, returning its session only while the session
    /// is neither expired nor revoked.
    pub async fn validate_token(&self, token: &str) -> AuthResult<Session> {
        let token_hash = Self::hash_token(token);

        let row = sqlx::query(
            r#"
            SELECT id, profile_id, token_hash, created_at, expires_at, revoked_at
            FROM sessions
            WHERE token_hash = ?
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Err(AuthError::InvalidSession);
        };

        let session = row_to_session(&row)?;
        if !Self::hashes_match(&session.token_hash, &token_hash) {
            return Err(AuthError::InvalidSession);
        }
        if !session.is_active(Utc::now()) {
            return Err(AuthError::InvalidSession);
        }
        Ok(session)
    }

    /// Revoke the session behind a bearer token. Revoking an unknown or
    /// already-revoked token is not an error.
    pub async fn revoke_token(&self, token: &str) -> AuthResult<()> {
        let token_hash = Self::hash_token(token);
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = ? WHERE token_hash = ? AND revoked_at IS NULL",
        )
        .bind(Utc::now())
        .bind(&token_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            debug!("Revoked session for token hash {}", &token_hash[..8]);
        }
        Ok(())
    }

    /// Revoke every active session belonging to a profile.
    pub async fn revoke_sessions_for_profile(&self, profile_id: &str) -> AuthResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = ? WHERE profile_id = ? AND revoked_at IS NULL",
        )
        .bind(Utc::now())
        .bind(profile_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> AuthResult<Session> {
    Ok(Session {
        id: row.try_get("id")?,
        profile_id: row.try_get("profile_id")?,
        token_hash: row.try_get("token_hash")?,
        created_at: row.try_get("created_at")?,
        expires_at: row.try_get("expires_at")?,
        revoked_at: row.try_get("revoked_at")?,
    })
}

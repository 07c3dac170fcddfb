// ABOUTME: Error types for authentication, sessions, and the surface gate
// ABOUTME: Flat taxonomy so API handlers can map each variant to a status code

use crate::gate::Surface;
use samrat_storage::StorageError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Email unknown or password did not match. Deliberately carries no
    /// detail so callers cannot distinguish the two cases.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credentials were fine but the profile row could not be read back.
    #[error("Failed to load user profile")]
    ProfileLookupFailed,

    /// Credentials were fine but the role does not admit the requested surface.
    #[error("This account is not authorized as {expected}")]
    SurfaceMismatch { expected: Surface },

    /// Session token missing, expired, or revoked.
    #[error("Session is invalid or has expired")]
    InvalidSession,

    /// Password hashing or verification failed internally.
    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The backing datastore could not be reached or failed mid-operation.
    /// Never retried automatically; callers surface the message and let the
    /// user resubmit.
    #[error("Service unavailable: {0}")]
    RemoteUnavailable(#[from] sqlx::Error),
}

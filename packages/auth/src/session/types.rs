// ABOUTME: Session types shared between the gate and API extractors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A login session. Only the SHA-256 hash of the bearer token is stored;
/// the plaintext token exists solely in the login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub profile_id: String,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

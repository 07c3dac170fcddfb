// ABOUTME: Login surface gate: verifies credentials, then checks the profile
// ABOUTME: role against the requested surface and revokes the session on mismatch

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::{info, warn};

use samrat_core::constants::{ADMIN_REDIRECT, CUSTOMER_REDIRECT};

use crate::error::{AuthError, AuthResult};
use crate::password::verify_password;
use crate::session::SessionStorage;

/// The two login surfaces of the application. Each surface admits a
/// different set of roles, and the two checks are deliberately asymmetric:
/// the admin surface accepts any role that *contains* "admin", while the
/// customer surface requires the role to *equal* "customer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Admin,
    Customer,
}

impl Surface {
    /// Whether a profile role admits this surface. Comparison is
    /// case-insensitive on both sides.
    pub fn authorizes(&self, role: &str) -> bool {
        let role = role.to_lowercase();
        match self {
            Surface::Admin => role.contains("admin"),
            Surface::Customer => role == "customer",
        }
    }

    /// Where the client should land after a successful login.
    pub fn redirect(&self) -> &'static str {
        match self {
            Surface::Admin => ADMIN_REDIRECT,
            Surface::Customer => CUSTOMER_REDIRECT,
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Surface::Admin => write!(f, "an Administrator"),
            Surface::Customer => write!(f, "a Customer"),
        }
    }
}

/// Result of a successful login: the plaintext bearer token (shown once),
/// the profile it belongs to, and the surface redirect.
#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub profile_id: String,
    pub role: String,
    pub redirect: &'static str,
}

#[derive(Clone)]
pub struct AuthGate {
    pool: SqlitePool,
    sessions: SessionStorage,
    session_ttl_hours: i64,
}

impl AuthGate {
    pub fn new(pool: SqlitePool, session_ttl_hours: i64) -> Self {
        let sessions = SessionStorage::new(pool.clone());
        Self {
            pool,
            sessions,
            session_ttl_hours,
        }
    }

    pub fn sessions(&self) -> &SessionStorage {
        &self.sessions
    }

    /// Authenticate an email/password pair against a surface.
    ///
    /// Credentials are verified first and a session is established; only then
    /// is the role checked. On a role mismatch the fresh session is revoked
    /// before the error is returned, so no session survives a failed gate.
    pub async fn authenticate(&self, email: &str, password: &str, surface: Surface) -> AuthResult<LoginOutcome> {
        let row = sqlx::query("SELECT id, password_hash FROM profiles WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            warn!("Login failed for {}: unknown email", email);
            return Err(AuthError::InvalidCredentials);
        };

        let profile_id: String = row.try_get("id")?;
        let password_hash: String = row.try_get("password_hash")?;

        if !verify_password(password, &password_hash)? {
            warn!("Login failed for {}: bad password", email);
            return Err(AuthError::InvalidCredentials);
        }

        let (_session, token) = self
            .sessions
            .create_session(&profile_id, self.session_ttl_hours)
            .await?;

        let role: Option<String> = sqlx::query_scalar("SELECT role FROM profiles WHERE id = ?")
            .bind(&profile_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|_| AuthError::ProfileLookupFailed)?;

        let Some(role) = role else {
            self.sessions.revoke_token(&token).await?;
            return Err(AuthError::ProfileLookupFailed);
        };

        if !surface.authorizes(&role) {
            warn!(
                "Login rejected for {}: role {:?} does not admit the {:?} surface",
                email, role, surface
            );
            self.sessions.revoke_token(&token).await?;
            return Err(AuthError::SurfaceMismatch { expected: surface });
        }

        info!("Login succeeded for {} on the {:?} surface", email, surface);
        Ok(LoginOutcome {
            token,
            profile_id,
            role,
            redirect: surface.redirect(),
        })
    }

    /// Sign out by revoking the session behind a bearer token.
    pub async fn sign_out(&self, token: &str) -> AuthResult<()> {
        self.sessions.revoke_token(token).await
    }
}

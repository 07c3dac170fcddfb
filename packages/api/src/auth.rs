// ABOUTME: Authentication extractors for API requests
// ABOUTME: Resolves bearer tokens to sessions and enforces the admin surface

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Json as ResponseJson, Response},
};

use samrat_auth::Surface;
use samrat_profiles::Profile;

use crate::db::DbState;
use crate::response::ApiResponse;

/// The authenticated caller behind a valid session
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub profile: Profile,
    pub token: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        Surface::Admin.authorizes(&self.profile.role)
    }

    /// Whether the caller may act on a customer's data: admins always,
    /// customers only on their own id.
    pub fn can_access(&self, customer_id: &str) -> bool {
        self.is_admin() || self.profile.id == customer_id
    }
}

/// An authenticated caller whose role admits the admin surface
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        ResponseJson(ApiResponse::<()>::error(message.to_string())),
    )
        .into_response()
}

fn forbidden(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        ResponseJson(ApiResponse::<()>::error(message.to_string())),
    )
        .into_response()
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    DbState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let db = DbState::from_ref(state);

        let Some(token) = bearer_token(parts) else {
            return Err(unauthorized("Missing bearer token"));
        };

        let session = db
            .auth_gate
            .sessions()
            .validate_token(&token)
            .await
            .map_err(|_| unauthorized("Session is invalid or has expired"))?;

        let profile = db
            .profile_storage
            .get_profile(&session.profile_id)
            .await
            .map_err(|_| unauthorized("Session profile no longer exists"))?;

        Ok(CurrentUser { profile, token })
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    DbState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;
        if !current.is_admin() {
            return Err(forbidden("Admin access required"));
        }
        Ok(AdminUser(current))
    }
}

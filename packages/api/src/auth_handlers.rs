// ABOUTME: HTTP request handlers for login, logout, and session introspection
// ABOUTME: Login runs the surface gate; its errors map to 401/403

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use samrat_auth::Surface;
use samrat_profiles::Profile;

use crate::auth::CurrentUser;
use crate::db::DbState;
use crate::response::{auth_error_response, ok_or_internal_error, ApiResponse};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub surface: Surface,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub redirect: &'static str,
    pub profile: Profile,
}

/// Authenticate against a surface and establish a session
pub async fn login(
    State(db): State<DbState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("Login attempt for {:?} surface", request.surface);

    let outcome = match db
        .auth_gate
        .authenticate(&request.email, &request.password, request.surface)
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => return auth_error_response(err, "Login failed"),
    };

    let result = db
        .profile_storage
        .get_profile(&outcome.profile_id)
        .await
        .map(|profile| LoginResponse {
            token: outcome.token,
            redirect: outcome.redirect,
            profile,
        });

    ok_or_internal_error(result, "Failed to load profile after login")
}

/// Revoke the presented session
pub async fn logout(State(db): State<DbState>, current_user: CurrentUser) -> impl IntoResponse {
    info!("Logout for profile {}", current_user.profile.id);

    match db.auth_gate.sign_out(&current_user.token).await {
        Ok(()) => axum::Json(ApiResponse::success(
            serde_json::json!({"message": "Signed out successfully"}),
        ))
        .into_response(),
        Err(err) => auth_error_response(err, "Failed to sign out"),
    }
}

/// The caller's own profile
pub async fn me(current_user: CurrentUser) -> impl IntoResponse {
    axum::Json(ApiResponse::success(current_user.profile))
}

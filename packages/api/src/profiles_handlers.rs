// ABOUTME: HTTP request handlers for profile management
// ABOUTME: Admin-only CRUD apart from self-reads of a single profile

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use samrat_auth::hash_password;
use samrat_profiles::{AccountStatus, Membership, ProfileCreateInput, ProfileUpdateInput};

use crate::auth::{AdminUser, CurrentUser};
use crate::db::DbState;
use crate::pagination::{PaginatedResponse, PaginationParams};
use crate::response::{created_or_internal_error, ok_or_internal_error, ApiResponse};

// Query's deserializer cannot flatten PaginationParams into this struct,
// so page/limit are declared inline and converted below
#[derive(Deserialize)]
pub struct ListProfilesParams {
    pub role: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListProfilesParams {
    fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// List profiles with optional role and name/email search filters
pub async fn list_profiles(
    State(db): State<DbState>,
    _admin: AdminUser,
    Query(params): Query<ListProfilesParams>,
) -> impl IntoResponse {
    let pagination = params.pagination();
    let (limit, offset) = pagination.validate();
    info!(
        "Listing profiles (role: {:?}, search: {:?})",
        params.role, params.search
    );

    let result = db
        .profile_storage
        .list_profiles_paginated(
            params.role.as_deref(),
            params.search.as_deref(),
            limit,
            offset,
        )
        .await
        .map(|(profiles, total)| PaginatedResponse::new(profiles, &pagination, total));

    ok_or_internal_error(result, "Failed to list profiles")
}

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub membership: Option<String>,
    pub password: String,
}

/// Create an admin or customer profile with an initial password
pub async fn create_profile(
    State(db): State<DbState>,
    _admin: AdminUser,
    Json(request): Json<CreateProfileRequest>,
) -> impl IntoResponse {
    info!("Creating profile for {} ({})", request.email, request.role);

    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseJson(ApiResponse::<()>::error(err.to_string())),
            )
                .into_response()
        }
    };

    let input = ProfileCreateInput {
        role: request.role,
        full_name: request.full_name,
        email: request.email,
        membership: request.membership.as_deref().map(Membership::parse),
    };

    let result = db.profile_storage.create_profile(input, &password_hash).await;
    created_or_internal_error(result, "Failed to create profile")
}

/// Fetch a single profile (admin or self)
pub async fn get_profile(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    if !current_user.can_access(&profile_id) {
        return (
            StatusCode::FORBIDDEN,
            ResponseJson(ApiResponse::<()>::error("Access denied".to_string())),
        )
            .into_response();
    }

    let result = db.profile_storage.get_profile(&profile_id).await;
    ok_or_internal_error(result, "Failed to get profile")
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub membership: Option<String>,
    pub status: Option<String>,
}

/// Patch full name, membership tier, or account status. Role is not
/// patchable through this endpoint.
pub async fn update_profile(
    State(db): State<DbState>,
    _admin: AdminUser,
    Path(profile_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    info!("Updating profile: {}", profile_id);

    let input = ProfileUpdateInput {
        full_name: request.full_name,
        membership: request.membership.as_deref().map(Membership::parse),
        status: request.status.as_deref().map(AccountStatus::parse),
    };

    let result = db.profile_storage.update_profile(&profile_id, input).await;
    ok_or_internal_error(result, "Failed to update profile")
}

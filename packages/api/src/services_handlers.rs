// ABOUTME: HTTP request handlers for service updates and progress aggregation
// ABOUTME: Progress responses carry entitlement lock flags for the dashboard

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use samrat_core::CANONICAL_SERVICES;
use samrat_notifications::{NotificationCreateInput, NotificationKind};
use samrat_profiles::is_service_locked;
use samrat_services::{compute_progress, ServiceUpdateCreateInput};

use crate::auth::{AdminUser, CurrentUser};
use crate::db::DbState;
use crate::pagination::{PaginatedResponse, PaginationParams};
use crate::response::{created_or_internal_error, ok_or_internal_error, ApiResponse};

fn access_denied() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        ResponseJson(ApiResponse::<()>::error("Access denied".to_string())),
    )
        .into_response()
}

/// Update timeline for one customer, newest first
pub async fn list_updates(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Path(customer_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    if !current_user.can_access(&customer_id) {
        return access_denied();
    }

    let (limit, offset) = params.validate();
    let result = db
        .update_storage
        .list_updates_paginated(&customer_id, limit, offset)
        .await
        .map(|(updates, total)| PaginatedResponse::new(updates, &params, total));

    ok_or_internal_error(result, "Failed to list service updates")
}

#[derive(Deserialize)]
pub struct CreateUpdateRequest {
    pub service: String,
    pub title: String,
    pub description: String,
    pub progress: i64,
}

/// Append a progress update for a customer and notify them
pub async fn create_update(
    State(db): State<DbState>,
    _admin: AdminUser,
    Path(customer_id): Path<String>,
    Json(request): Json<CreateUpdateRequest>,
) -> impl IntoResponse {
    info!(
        "Creating update for customer {} ({} at {}%)",
        customer_id, request.service, request.progress
    );

    let input = ServiceUpdateCreateInput {
        service: request.service,
        title: request.title,
        description: request.description,
        progress: request.progress,
    };

    let result = db.update_storage.create_update(&customer_id, input).await;

    if let Ok(update) = &result {
        // Notification failure never fails the update itself
        let notification = NotificationCreateInput {
            user_id: Some(customer_id.clone()),
            title: format!("{} Update", update.service),
            message: update.title.clone(),
            kind: NotificationKind::Info,
        };
        if let Err(err) = db.notification_storage.create_notification(notification).await {
            tracing::warn!("Failed to create update notification: {}", err);
        }
    }

    created_or_internal_error(result, "Failed to create service update")
}

#[derive(Serialize)]
pub struct ServiceProgressEntry {
    pub service: String,
    pub progress: i64,
    pub locked: bool,
}

#[derive(Serialize)]
pub struct ProgressResponse {
    pub services: Vec<ServiceProgressEntry>,
    pub average: i64,
}

/// Aggregated per-service progress plus the dashboard average, with each
/// service flagged locked or unlocked by the customer's membership
pub async fn get_progress(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Path(customer_id): Path<String>,
) -> impl IntoResponse {
    if !current_user.can_access(&customer_id) {
        return access_denied();
    }

    let profile = match db.profile_storage.get_profile(&customer_id).await {
        Ok(profile) => profile,
        Err(err) => return crate::response::storage_error_response(err, "Failed to get profile"),
    };

    let result = db
        .update_storage
        .list_updates_for_aggregation(&customer_id)
        .await
        .map(|updates| {
            let report = compute_progress(&updates, &CANONICAL_SERVICES);
            let services = report
                .per_service
                .into_iter()
                .map(|entry| ServiceProgressEntry {
                    locked: is_service_locked(profile.membership, &entry.service),
                    service: entry.service,
                    progress: entry.progress,
                })
                .collect();
            ProgressResponse {
                services,
                average: report.average,
            }
        });

    ok_or_internal_error(result, "Failed to compute progress")
}

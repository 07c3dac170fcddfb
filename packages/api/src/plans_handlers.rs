// ABOUTME: HTTP request handlers for the membership plan catalog
// ABOUTME: Upgrade requests become global notifications for the admin feed

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use samrat_notifications::{NotificationCreateInput, NotificationKind};
use samrat_profiles::plan_catalog;

use crate::auth::CurrentUser;
use crate::db::DbState;
use crate::response::{created_or_internal_error, ApiResponse};

/// The static plan catalog
pub async fn list_plans() -> impl IntoResponse {
    ResponseJson(ApiResponse::success(plan_catalog()))
}

#[derive(Deserialize)]
pub struct UpgradeRequest {
    pub plan: String,
}

/// Record a customer's request to move to another plan
pub async fn request_upgrade(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Path(customer_id): Path<String>,
    Json(request): Json<UpgradeRequest>,
) -> impl IntoResponse {
    if !current_user.can_access(&customer_id) {
        return (
            StatusCode::FORBIDDEN,
            ResponseJson(ApiResponse::<()>::error("Access denied".to_string())),
        )
            .into_response();
    }

    let known_plan = plan_catalog()
        .iter()
        .any(|p| p.name.eq_ignore_ascii_case(&request.plan));
    if !known_plan {
        return (
            StatusCode::BAD_REQUEST,
            ResponseJson(ApiResponse::<()>::error(format!(
                "Unknown plan: {}",
                request.plan
            ))),
        )
            .into_response();
    }

    info!(
        "Upgrade request from customer {} to plan {}",
        customer_id, request.plan
    );

    let input = NotificationCreateInput {
        user_id: None,
        title: "Plan upgrade requested".to_string(),
        message: format!(
            "{} requested an upgrade to the {} plan",
            current_user.profile.full_name, request.plan
        ),
        kind: NotificationKind::Info,
    };

    let result = db.notification_storage.create_notification(input).await;
    created_or_internal_error(result, "Failed to record upgrade request")
}

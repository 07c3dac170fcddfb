// ABOUTME: HTTP request handlers for the notification feed
// ABOUTME: Callers see their own notifications plus global ones

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use samrat_notifications::{NotificationCreateInput, NotificationKind};

use crate::auth::{AdminUser, CurrentUser};
use crate::db::DbState;
use crate::response::{created_or_internal_error, ok_or_internal_error};

/// Notifications scoped to the caller plus global ones, newest first
pub async fn list_notifications(
    State(db): State<DbState>,
    current_user: CurrentUser,
) -> impl IntoResponse {
    let result = db
        .notification_storage
        .list_for_profile(&current_user.profile.id)
        .await;

    ok_or_internal_error(result, "Failed to list notifications")
}

#[derive(Deserialize)]
pub struct CreateNotificationRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Create a notification, targeted at one profile or global when no target
pub async fn create_notification(
    State(db): State<DbState>,
    _admin: AdminUser,
    Json(request): Json<CreateNotificationRequest>,
) -> impl IntoResponse {
    info!("Creating notification: {}", request.title);

    let input = NotificationCreateInput {
        user_id: request.user_id,
        title: request.title,
        message: request.message,
        kind: request
            .kind
            .as_deref()
            .map(NotificationKind::parse)
            .unwrap_or(NotificationKind::Info),
    };

    let result = db.notification_storage.create_notification(input).await;
    created_or_internal_error(result, "Failed to create notification")
}

/// Mark one notification as read
pub async fn mark_notification_read(
    State(db): State<DbState>,
    _current_user: CurrentUser,
    Path(notification_id): Path<String>,
) -> impl IntoResponse {
    let result = db
        .notification_storage
        .mark_read(&notification_id)
        .await
        .map(|_| serde_json::json!({"message": "Notification marked as read"}));

    ok_or_internal_error(result, "Failed to mark notification read")
}

// ABOUTME: Notification type definitions
// ABOUTME: Feed entries scoped to a profile or global (admin-facing)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
}

impl NotificationKind {
    /// Total parse: unknown kinds fall back to Info
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "success" => NotificationKind::Success,
            "warning" => NotificationKind::Warning,
            _ => NotificationKind::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

/// A feed entry. `user_id` of None means the notification is global and
/// shows up for every administrator. Only `is_read` is ever mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationCreateInput {
    pub user_id: Option<String>,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

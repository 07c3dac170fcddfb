// ABOUTME: Notification feed for Samrat CRM
// ABOUTME: Global and per-profile notifications with mark-read mutation

pub mod storage;
pub mod types;


pub use storage::NotificationStorage;
pub use types::{Notification, NotificationCreateInput, NotificationKind};

// ABOUTME: HTTP API layer for Samrat CRM providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

pub mod analytics_handlers;
pub mod auth;
pub mod auth_handlers;
pub mod db;
pub mod files_handlers;
pub mod health;
pub mod notifications_handlers;
pub mod pagination;
pub mod plans_handlers;
pub mod profiles_handlers;
pub mod response;
pub mod services_handlers;

pub use db::{DbOptions, DbState};

/// Authentication routes: login, logout, session introspection
pub fn create_auth_router() -> Router<DbState> {
    Router::new()
        .route("/login", post(auth_handlers::login))
        .route("/logout", post(auth_handlers::logout))
        .route("/me", get(auth_handlers::me))
}

/// Admin profile management routes
pub fn create_profiles_router() -> Router<DbState> {
    Router::new()
        .route("/", get(profiles_handlers::list_profiles))
        .route("/", post(profiles_handlers::create_profile))
        .route("/{id}", get(profiles_handlers::get_profile))
        .route("/{id}", put(profiles_handlers::update_profile))
}

/// Per-customer routes: updates, progress, files, upgrade requests
pub fn create_customers_router() -> Router<DbState> {
    Router::new()
        .route("/{id}/updates", get(services_handlers::list_updates))
        .route("/{id}/updates", post(services_handlers::create_update))
        .route("/{id}/progress", get(services_handlers::get_progress))
        .route("/{id}/files", get(files_handlers::list_files))
        .route("/{id}/files", post(files_handlers::upload_files))
        .route(
            "/{id}/upgrade-request",
            post(plans_handlers::request_upgrade),
        )
}

/// Notification feed routes
pub fn create_notifications_router() -> Router<DbState> {
    Router::new()
        .route("/", get(notifications_handlers::list_notifications))
        .route("/", post(notifications_handlers::create_notification))
        .route(
            "/{id}/read",
            put(notifications_handlers::mark_notification_read),
        )
}

/// Admin analytics routes
pub fn create_analytics_router() -> Router<DbState> {
    Router::new()
        .route("/memberships", get(analytics_handlers::membership_analytics))
        .route("/services", get(analytics_handlers::service_analytics))
        .route("/progress", get(analytics_handlers::progress_analytics))
}

/// Assemble the full API under /api with shared state
pub fn create_router(db: DbState) -> Router {
    // Multipart bodies may carry several files up to the blob limit each
    let body_limit = (db.blob_store.max_object_bytes() as usize).saturating_mul(4);

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/status", get(health::status_check))
        .route("/api/plans", get(plans_handlers::list_plans))
        .route(
            "/api/files/{id}/download",
            get(files_handlers::download_file),
        )
        .nest("/api/auth", create_auth_router())
        .nest("/api/profiles", create_profiles_router())
        .nest("/api/customers", create_customers_router())
        .nest("/api/notifications", create_notifications_router())
        .nest("/api/analytics", create_analytics_router())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(db)
}

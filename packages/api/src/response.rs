// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use tracing::error;

use samrat_auth::AuthError;
use samrat_storage::StorageError;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Map a storage result to 200 / error JSON
pub fn ok_or_internal_error<T: Serialize>(
    result: Result<T, StorageError>,
    context: &str,
) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, ResponseJson(ApiResponse::success(data))).into_response(),
        Err(err) => storage_error_response(err, context),
    }
}

/// Map a storage result to 201 / error JSON
pub fn created_or_internal_error<T: Serialize>(
    result: Result<T, StorageError>,
    context: &str,
) -> Response {
    match result {
        Ok(data) => (
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(data)),
        )
            .into_response(),
        Err(err) => storage_error_response(err, context),
    }
}

/// Convert a storage error to the status code it deserves
pub fn storage_error_response(err: StorageError, context: &str) -> Response {
    let (status, message) = match &err {
        StorageError::NotFound | StorageError::Sqlx(sqlx::Error::RowNotFound) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        StorageError::DuplicateEmail(_) => (StatusCode::CONFLICT, err.to_string()),
        StorageError::InvalidValue(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        StorageError::PayloadTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, err.to_string()),
        StorageError::Sqlx(_) | StorageError::Migration(_) => {
            error!("{}: {}", context, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            )
        }
        _ => {
            error!("{}: {}", context, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
}

/// Convert an auth error to the status code it deserves
pub fn auth_error_response(err: AuthError, context: &str) -> Response {
    let (status, message) = match &err {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
        AuthError::InvalidSession => (StatusCode::UNAUTHORIZED, err.to_string()),
        AuthError::SurfaceMismatch { .. } => (StatusCode::FORBIDDEN, err.to_string()),
        AuthError::ProfileLookupFailed => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        AuthError::RemoteUnavailable(_) => {
            error!("{}: {}", context, err);
            (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable".to_string())
        }
        AuthError::Storage(storage_err) => return storage_error_response_ref(storage_err, context),
        _ => {
            error!("{}: {}", context, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
}

fn storage_error_response_ref(err: &StorageError, context: &str) -> Response {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, err.to_string())
    } else {
        error!("{}: {}", context, err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };
    (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
}

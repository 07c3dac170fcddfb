// ABOUTME: HTTP request handlers for customer file upload and download
// ABOUTME: Multipart uploads are processed per file; one failure never aborts the batch

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use tracing::{info, warn};

use samrat_core::format_file_size;
use samrat_files::{BlobStore, FileRecord};
use samrat_notifications::{NotificationCreateInput, NotificationKind};

use crate::auth::CurrentUser;
use crate::db::DbState;
use crate::response::{ok_or_internal_error, storage_error_response, ApiResponse};

fn access_denied() -> Response {
    (
        StatusCode::FORBIDDEN,
        ResponseJson(ApiResponse::<()>::error("Access denied".to_string())),
    )
        .into_response()
}

/// File metadata list for one customer, newest first
pub async fn list_files(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Path(customer_id): Path<String>,
) -> impl IntoResponse {
    if !current_user.can_access(&customer_id) {
        return access_denied();
    }

    let result = db.file_storage.list_files(&customer_id).await;
    ok_or_internal_error(result, "Failed to list files")
}

/// Outcome of one file within an upload batch
#[derive(Serialize)]
pub struct UploadOutcome {
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRecord>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub uploaded: usize,
    pub failed: usize,
    pub outcomes: Vec<UploadOutcome>,
}

/// Accept a multipart batch of files. Each file is stored independently;
/// the response reports a per-file outcome instead of failing the batch.
pub async fn upload_files(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Path(customer_id): Path<String>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    if !current_user.can_access(&customer_id) {
        return access_denied();
    }

    let mut outcomes: Vec<UploadOutcome> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                warn!("Malformed multipart field: {}", err);
                outcomes.push(UploadOutcome {
                    name: "<unknown>".to_string(),
                    success: false,
                    error: Some(err.to_string()),
                    file: None,
                });
                break;
            }
        };

        let Some(file_name) = field.file_name().map(|n| n.to_string()) else {
            // Non-file fields are ignored
            continue;
        };

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                outcomes.push(UploadOutcome {
                    name: file_name,
                    success: false,
                    error: Some(err.to_string()),
                    file: None,
                });
                continue;
            }
        };

        outcomes.push(store_one_file(&db, &customer_id, &file_name, &bytes).await);
    }

    let uploaded = outcomes.iter().filter(|o| o.success).count();
    let failed = outcomes.len() - uploaded;

    info!(
        "Upload batch for customer {}: {} stored, {} failed",
        customer_id, uploaded, failed
    );

    if uploaded > 0 {
        // Notify admins about new customer documents; failure is logged only
        let notification = NotificationCreateInput {
            user_id: None,
            title: "New files uploaded".to_string(),
            message: format!(
                "{} uploaded {} file(s)",
                current_user.profile.full_name, uploaded
            ),
            kind: NotificationKind::Info,
        };
        if let Err(err) = db.notification_storage.create_notification(notification).await {
            warn!("Failed to create upload notification: {}", err);
        }
    }

    ResponseJson(ApiResponse::success(UploadResponse {
        uploaded,
        failed,
        outcomes,
    }))
    .into_response()
}

/// Store one file's bytes and metadata row; errors become a failed outcome
async fn store_one_file(
    db: &DbState,
    customer_id: &str,
    file_name: &str,
    bytes: &[u8],
) -> UploadOutcome {
    let key = BlobStore::make_key(customer_id, file_name);

    if let Err(err) = db.blob_store.put(&key, bytes).await {
        return UploadOutcome {
            name: file_name.to_string(),
            success: false,
            error: Some(err.to_string()),
            file: None,
        };
    }

    let size = format_file_size(bytes.len() as u64);
    match db
        .file_storage
        .create_file(customer_id, file_name, &key, &size)
        .await
    {
        Ok(record) => UploadOutcome {
            name: file_name.to_string(),
            success: true,
            error: None,
            file: Some(record),
        },
        Err(err) => UploadOutcome {
            name: file_name.to_string(),
            success: false,
            error: Some(err.to_string()),
            file: None,
        },
    }
}

/// Stream a stored file back as an attachment (admin or owner)
pub async fn download_file(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Path(file_id): Path<String>,
) -> impl IntoResponse {
    let record = match db.file_storage.get_file(&file_id).await {
        Ok(record) => record,
        Err(err) => return storage_error_response(err, "Failed to get file"),
    };

    if !current_user.can_access(&record.customer_id) {
        return access_denied();
    }

    let bytes = match db.blob_store.get(&record.file_path).await {
        Ok(bytes) => bytes,
        Err(err) => return storage_error_response(err, "Failed to read file bytes"),
    };

    let disposition = format!("attachment; filename=\"{}\"", record.name.replace('"', ""));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

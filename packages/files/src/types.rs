// ABOUTME: File record type definitions
// ABOUTME: Pointer rows for blobs held in the blob store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for an uploaded file. `file_path` is the opaque blob-store key;
/// `size` is the display string shown in file lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub file_path: String,
    pub size: String,
    pub uploaded_at: DateTime<Utc>,
}

// ABOUTME: Filesystem-backed blob store for uploaded file bytes
// ABOUTME: Opaque keys of the form {customer_id}/{nanoid}.{ext}

use std::path::{Path, PathBuf};

use tracing::debug;

use samrat_storage::StorageError;

/// Blob storage rooted at a configurable directory. Keys are relative paths
/// minted by [`BlobStore::make_key`]; path traversal in a key is rejected.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
    max_object_bytes: u64,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>, max_object_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_object_bytes,
        }
    }

    /// Mint a fresh storage key for a customer upload, keeping the original
    /// extension so downloads open with the right application.
    pub fn make_key(customer_id: &str, file_name: &str) -> String {
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}/{}.{}", customer_id, nanoid::nanoid!(), ext),
            None => format!("{}/{}", customer_id, nanoid::nanoid!()),
        }
    }

    pub fn max_object_bytes(&self) -> u64 {
        self.max_object_bytes
    }

    pub async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        if bytes.len() as u64 > self.max_object_bytes {
            return Err(StorageError::PayloadTooLarge {
                size: bytes.len() as u64,
                limit: self.max_object_bytes,
            });
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        debug!("Writing blob: {} ({} bytes)", key, bytes.len());
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(key)?;

        debug!("Reading blob: {}", key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let traversal = relative.components().any(|c| {
            !matches!(c, std::path::Component::Normal(_))
        });
        if key.is_empty() || traversal {
            return Err(StorageError::InvalidValue(format!("invalid blob key: {}", key)));
        }
        Ok(self.root.join(relative))
    }
}

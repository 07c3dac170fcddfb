// ABOUTME: Database connection management and shared handler state
// ABOUTME: Opens the SQLite pool, runs migrations, and wires up storage layers

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use samrat_auth::AuthGate;
use samrat_files::{BlobStore, FileStorage};
use samrat_notifications::NotificationStorage;
use samrat_profiles::ProfileStorage;
use samrat_services::ServiceUpdateStorage;
use samrat_storage::StorageError;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Tunables for state initialization; `Default` gives production paths
/// under the samrat home directory.
#[derive(Debug, Clone, Default)]
pub struct DbOptions {
    pub database_path: Option<PathBuf>,
    pub blob_dir: Option<PathBuf>,
    pub max_upload_bytes: Option<u64>,
    pub session_ttl_hours: Option<i64>,
}

/// Shared state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub auth_gate: AuthGate,
    pub profile_storage: Arc<ProfileStorage>,
    pub update_storage: Arc<ServiceUpdateStorage>,
    pub file_storage: Arc<FileStorage>,
    pub notification_storage: Arc<NotificationStorage>,
    pub blob_store: Arc<BlobStore>,
}

impl DbState {
    /// Create state from an already-migrated pool
    pub fn new(pool: SqlitePool, options: &DbOptions) -> Self {
        let blob_dir = options
            .blob_dir
            .clone()
            .unwrap_or_else(|| samrat_core::samrat_dir().join("blobs"));
        let max_upload_bytes = options.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        let session_ttl_hours = options
            .session_ttl_hours
            .unwrap_or(DEFAULT_SESSION_TTL_HOURS);

        Self {
            auth_gate: AuthGate::new(pool.clone(), session_ttl_hours),
            profile_storage: Arc::new(ProfileStorage::new(pool.clone())),
            update_storage: Arc::new(ServiceUpdateStorage::new(pool.clone())),
            file_storage: Arc::new(FileStorage::new(pool.clone())),
            notification_storage: Arc::new(NotificationStorage::new(pool.clone())),
            blob_store: Arc::new(BlobStore::new(blob_dir, max_upload_bytes)),
            pool,
        }
    }

    /// Initialize state with default configuration
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_options(DbOptions::default()).await
    }

    /// Open the database, apply pragmas, run migrations, and build state
    pub async fn init_with_options(options: DbOptions) -> Result<Self, StorageError> {
        let database_path = options
            .database_path
            .clone()
            .unwrap_or_else(|| samrat_core::samrat_dir().join("samrat.db"));

        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());

        debug!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        sqlx::migrate!("../storage/migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        debug!("Database migrations completed");

        Ok(Self::new(pool, &options))
    }

    /// In-memory database for test harnesses. A single connection keeps
    /// every query on the same in-memory instance.
    pub async fn init_in_memory(options: DbOptions) -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::migrate!("../storage/migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        Ok(Self::new(pool, &options))
    }
}

// ABOUTME: Customer file handling for Samrat CRM
// ABOUTME: Metadata rows in SQLite, bytes in a filesystem blob store

pub mod blob;
pub mod storage;
pub mod types;


pub use blob::BlobStore;
pub use storage::FileStorage;
pub use types::FileRecord;

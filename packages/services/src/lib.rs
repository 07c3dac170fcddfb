// ABOUTME: Service progress tracking for Samrat CRM
// ABOUTME: Append-only update records and the per-customer progress aggregator

pub mod progress;
pub mod storage;
pub mod types;


pub use progress::{compute_progress, ProgressReport, ServiceProgress};
pub use storage::ServiceUpdateStorage;
pub use types::{ServiceUpdate, ServiceUpdateCreateInput};

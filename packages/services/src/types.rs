// ABOUTME: Service update type definitions
// ABOUTME: Timestamped per-service progress records owned by one customer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One progress update for a customer's service. Rows are append-only: the
/// current state of a service is the most recently created row for that
/// (customer, service) pair, never an in-place edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub id: String,
    pub customer_id: String,
    pub service: String,
    pub title: String,
    pub description: String,
    pub progress: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceUpdateCreateInput {
    pub service: String,
    pub title: String,
    pub description: String,
    pub progress: i64,
}

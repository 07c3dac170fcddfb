// ABOUTME: HTTP request handlers for admin dashboard analytics
// ABOUTME: Membership totals, per-service update counts, and progress ranking

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use tracing::info;

use samrat_core::CANONICAL_SERVICES;
use samrat_profiles::Membership;
use samrat_services::compute_progress;
use samrat_storage::StorageError;

use crate::auth::AdminUser;
use crate::db::DbState;
use crate::response::ok_or_internal_error;

/// Membership totals across customer accounts
pub async fn membership_analytics(
    State(db): State<DbState>,
    _admin: AdminUser,
) -> impl IntoResponse {
    info!("Computing membership analytics");

    let result = db.profile_storage.membership_stats().await;
    ok_or_internal_error(result, "Failed to compute membership analytics")
}

#[derive(Serialize)]
pub struct ServiceCount {
    pub service: String,
    pub count: i64,
}

/// Update counts per service name, most active first
pub async fn service_analytics(State(db): State<DbState>, _admin: AdminUser) -> impl IntoResponse {
    info!("Computing service analytics");

    let result = db.update_storage.counts_per_service().await.map(|counts| {
        counts
            .into_iter()
            .map(|(service, count)| ServiceCount { service, count })
            .collect::<Vec<_>>()
    });

    ok_or_internal_error(result, "Failed to compute service analytics")
}

#[derive(Serialize)]
pub struct CustomerProgressRank {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub membership: Membership,
    pub average: i64,
}

/// Average progress per customer, ranked descending
pub async fn progress_analytics(State(db): State<DbState>, _admin: AdminUser) -> impl IntoResponse {
    info!("Computing progress ranking");

    let result = progress_ranking(&db).await;
    ok_or_internal_error(result, "Failed to compute progress ranking")
}

async fn progress_ranking(db: &DbState) -> Result<Vec<CustomerProgressRank>, StorageError> {
    let customers = db.profile_storage.list_customers().await?;

    let mut ranking = Vec::with_capacity(customers.len());
    for customer in customers {
        let updates = db
            .update_storage
            .list_updates_for_aggregation(&customer.id)
            .await?;
        let report = compute_progress(&updates, &CANONICAL_SERVICES);
        ranking.push(CustomerProgressRank {
            customer_id: customer.id,
            full_name: customer.full_name,
            membership: customer.membership,
            average: report.average,
        });
    }

    ranking.sort_by(|a, b| b.average.cmp(&a.average));
    Ok(ranking)
}

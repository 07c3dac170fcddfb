// ABOUTME: Progress aggregation over service update records
// ABOUTME: Latest-per-service selection plus the fixed-set dashboard average

use serde::Serialize;

use crate::types::ServiceUpdate;

/// Current progress value for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceProgress {
    pub service: String,
    pub progress: i64,
}

/// Aggregated progress for one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    pub per_service: Vec<ServiceProgress>,
    pub average: i64,
}

/// Compute each service's current progress and the customer's average.
///
/// For every name in `services` (plus any extra distinct service names seen
/// in `updates`, in first-seen order) the current value is the `progress` of
/// the update with the greatest `created_at` matching that service
/// case-insensitively, or 0 when none matches. Timestamps are not guaranteed
/// unique; on a tie the update appearing later in the input slice wins, so
/// callers that fetch in insertion order get latest-inserted semantics.
///
/// The average is the integer round of the sum over `services` only divided
/// by `services.len()` — extra services never move the dashboard KPI. An
/// empty `services` list yields average 0.
pub fn compute_progress(updates: &[ServiceUpdate], services: &[&str]) -> ProgressReport {
    let mut names: Vec<String> = services.iter().map(|s| s.to_string()).collect();
    for update in updates {
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&update.service)) {
            names.push(update.service.clone());
        }
    }

    let per_service: Vec<ServiceProgress> = names
        .into_iter()
        .map(|name| {
            let mut current: Option<&ServiceUpdate> = None;
            for update in updates {
                if !update.service.eq_ignore_ascii_case(&name) {
                    continue;
                }
                // >= so that a later element wins a timestamp tie
                match current {
                    Some(best) if update.created_at < best.created_at => {}
                    _ => current = Some(update),
                }
            }
            ServiceProgress {
                service: name,
                progress: current.map(|u| u.progress).unwrap_or(0),
            }
        })
        .collect();

    let average = if services.is_empty() {
        0
    } else {
        let sum: i64 = per_service
            .iter()
            .take(services.len())
            .map(|p| p.progress)
            .sum();
        (sum as f64 / services.len() as f64).round() as i64
    };

    ProgressReport {
        per_service,
        average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use samrat_core::CANONICAL_SERVICES;

    fn update(service: &str, progress: i64, offset_secs: i64) -> ServiceUpdate {
        ServiceUpdate {
            id: format!("u-{}-{}", service, offset_secs),
            customer_id: "cust-1".to_string(),
            service: service.to_string(),
            title: "update".to_string(),
            description: "desc".to_string(),
            progress,
            created_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn test_empty_updates_yield_zeros() {
        let report = compute_progress(&[], &CANONICAL_SERVICES);
        assert_eq!(report.average, 0);
        assert_eq!(report.per_service.len(), 3);
        for entry in &report.per_service {
            assert_eq!(entry.progress, 0);
        }
    }

    #[test]
    fn test_latest_update_wins_per_service() {
        let updates = vec![update("SEO", 80, 0), update("SEO", 95, 10)];
        let report = compute_progress(&updates, &CANONICAL_SERVICES);
        let seo = report
            .per_service
            .iter()
            .find(|p| p.service == "SEO")
            .unwrap();
        assert_eq!(seo.progress, 95);
    }

    #[test]
    fn test_order_in_slice_does_not_matter_for_distinct_timestamps() {
        let updates = vec![update("SEO", 95, 10), update("SEO", 80, 0)];
        let report = compute_progress(&updates, &CANONICAL_SERVICES);
        let seo = report
            .per_service
            .iter()
            .find(|p| p.service == "SEO")
            .unwrap();
        assert_eq!(seo.progress, 95);
    }

    #[test]
    fn test_timestamp_tie_breaks_to_later_element() {
        let ts = Utc::now();
        let mut first = update("Website", 40, 0);
        let mut second = update("Website", 70, 0);
        first.created_at = ts;
        second.created_at = ts;

        let report = compute_progress(&[first, second], &CANONICAL_SERVICES);
        let website = report
            .per_service
            .iter()
            .find(|p| p.service == "Website")
            .unwrap();
        assert_eq!(website.progress, 70);
    }

    #[test]
    fn test_service_matching_is_case_insensitive() {
        let updates = vec![update("website", 55, 0)];
        let report = compute_progress(&updates, &CANONICAL_SERVICES);
        let website = report
            .per_service
            .iter()
            .find(|p| p.service == "Website")
            .unwrap();
        assert_eq!(website.progress, 55);
    }

    #[test]
    fn test_average_rounds_over_canonical_count() {
        let updates = vec![
            update("Website", 100, 0),
            update("SEO", 50, 0),
            // Social Media has no updates -> 0
        ];
        let report = compute_progress(&updates, &CANONICAL_SERVICES);
        assert_eq!(report.average, 50);
    }

    #[test]
    fn test_extra_services_reported_but_excluded_from_average() {
        let updates = vec![update("Website", 100, 0), update("Email Marketing", 100, 0)];
        let report = compute_progress(&updates, &CANONICAL_SERVICES);

        assert_eq!(report.per_service.len(), 4);
        let extra = report
            .per_service
            .iter()
            .find(|p| p.service == "Email Marketing")
            .unwrap();
        assert_eq!(extra.progress, 100);
        // Average stays round(100 / 3), untouched by the extra service
        assert_eq!(report.average, 33);
    }

    #[test]
    fn test_empty_service_list_has_zero_average() {
        let updates = vec![update("Website", 100, 0)];
        let report = compute_progress(&updates, &[]);
        assert_eq!(report.average, 0);
        // The observed service still shows up for display
        assert_eq!(report.per_service.len(), 1);
    }
}

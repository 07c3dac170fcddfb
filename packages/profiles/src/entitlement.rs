// ABOUTME: Plan-based feature locking for service progress views
// ABOUTME: Pure table-driven policy evaluated by membership tier

use crate::types::Membership;

/// Decide whether a service's progress view is locked for a membership tier.
///
/// Locking is a display affordance, not a data-access boundary: callers still
/// compute the underlying progress and attach this flag so the client can
/// render an upgrade overlay instead of the live card.
pub fn is_service_locked(membership: Membership, service: &str) -> bool {
    let service = service.to_lowercase();
    match membership {
        Membership::Premium => false,
        Membership::Pro => !matches!(service.as_str(), "website" | "seo"),
        Membership::Basic => service != "website",
    }
}

use std::env;
use std::path::PathBuf;

/// Canonical service offerings tracked for every customer.
///
/// Custom service names may appear in update records beyond these three, but
/// the dashboard KPI (average progress) is always computed over this fixed
/// set.
pub const CANONICAL_SERVICES: [&str; 3] = ["Website", "SEO", "Social Media"];

/// Redirect target for an authorized admin login
pub const ADMIN_REDIRECT: &str = "/admin";

/// Redirect target for an authorized customer login
pub const CUSTOMER_REDIRECT: &str = "/customer";

/// Get the path to the Samrat data directory (~/.samrat)
pub fn samrat_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".samrat")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".samrat")
    }
}

// ABOUTME: Profile type definitions
// ABOUTME: Account records with role, membership tier, and status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription tier gating feature visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    Basic,
    Pro,
    Premium,
}

impl Membership {
    /// Total parse: unknown values fall back to Basic
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "premium" => Membership::Premium,
            "pro" => Membership::Pro,
            _ => Membership::Basic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Membership::Basic => "Basic",
            Membership::Pro => "Pro",
            Membership::Premium => "Premium",
        }
    }
}

/// Account standing, admin-mutable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    /// Total parse: unknown values fall back to Active
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "inactive" => AccountStatus::Inactive,
            _ => AccountStatus::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
        }
    }
}

/// An account record. The role is a free-form string on purpose: admin
/// sub-roles such as "Super Admin" or "Support Admin" must survive storage
/// untouched because the login gate matches on them textually.
///
/// The password hash never leaves the database through this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub role: String,
    pub full_name: String,
    pub email: String,
    pub membership: Membership,
    pub status: AccountStatus,
    pub join_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileCreateInput {
    pub role: String,
    pub full_name: String,
    pub email: String,
    pub membership: Option<Membership>,
}

/// Admin-side patch. Role is deliberately absent: it is immutable after
/// creation in the normal flow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdateInput {
    pub full_name: Option<String>,
    pub membership: Option<Membership>,
    pub status: Option<AccountStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_parse_is_total() {
        assert_eq!(Membership::parse("Premium"), Membership::Premium);
        assert_eq!(Membership::parse("pro"), Membership::Pro);
        assert_eq!(Membership::parse("Basic"), Membership::Basic);
        // Unknown tiers fall back to Basic
        assert_eq!(Membership::parse("Enterprise"), Membership::Basic);
        assert_eq!(Membership::parse(""), Membership::Basic);
    }

    #[test]
    fn test_status_parse_is_total() {
        assert_eq!(AccountStatus::parse("Inactive"), AccountStatus::Inactive);
        assert_eq!(AccountStatus::parse("active"), AccountStatus::Active);
        assert_eq!(AccountStatus::parse("suspended"), AccountStatus::Active);
    }
}

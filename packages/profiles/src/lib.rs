// ABOUTME: Profile account management for Samrat CRM
// ABOUTME: Provides types, storage, plan catalog, and the entitlement resolver

pub mod entitlement;
pub mod plans;
pub mod storage;
pub mod types;


pub use entitlement::is_service_locked;
pub use plans::{plan_catalog, Plan};
pub use storage::{MembershipStats, ProfileStorage};
pub use types::{AccountStatus, Membership, Profile, ProfileCreateInput, ProfileUpdateInput};

// ABOUTME: Core constants and utilities for Samrat CRM
// ABOUTME: Foundational package shared across all Samrat packages

pub mod constants;
pub mod utils;

// Re-export constants
pub use constants::{samrat_dir, ADMIN_REDIRECT, CANONICAL_SERVICES, CUSTOMER_REDIRECT};

// Re-export utilities
pub use utils::format_file_size;

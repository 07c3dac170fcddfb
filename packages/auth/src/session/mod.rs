// ABOUTME: Session module: bearer token generation and session persistence

pub mod storage;
pub mod types;

#[cfg(test)]
mod storage_test;

pub use storage::SessionStorage;
pub use types::Session;

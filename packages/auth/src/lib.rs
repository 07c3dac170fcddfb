// ABOUTME: Authentication for Samrat CRM: password hashing, bearer-token
// ABOUTME: sessions, and the asymmetric admin/customer login surface gate

pub mod error;
pub mod gate;
pub mod password;
pub mod session;

pub use error::{AuthError, AuthResult};
pub use gate::{AuthGate, LoginOutcome, Surface};
pub use password::{hash_password, verify_password};
pub use session::{Session, SessionStorage};

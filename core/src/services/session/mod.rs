//! Session manager module
//!
//! - Email/password login gated on email verification
//! - Token pair issuance with a single stored refresh session per account
//! - Atomic, single-use refresh rotation
//! - Logout by revoking the stored refresh session

mod password;
mod service;


pub use password::{hash_password, verify_password};
pub use service::SessionManager;

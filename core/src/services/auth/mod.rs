//! Authentication service module
//!
//! This module ties the account lifecycle together:
//! - Registration with bcrypt password hashing
//! - Email verification and resend
//! - Login, refresh rotation and logout

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, RegisterAccount};

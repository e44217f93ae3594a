//! Verification workflow module
//!
//! This module provides the email verification flow:
//! - Six-digit code generation and storage with a ten minute lifetime
//! - Background delivery through an `EmailSender`
//! - Single-use confirmation that activates the account and signs it in

mod config;
mod service;
mod template;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationConfig;
pub use service::VerificationWorkflow;
pub use template::verification_email;
pub use traits::{EmailMessage, EmailSender};

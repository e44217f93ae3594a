//! # SkillLink Core
//!
//! Core domain layer for the SkillLink backend: account entities, the error
//! taxonomy, repository and store interfaces, and the authentication and
//! session-lifecycle services built on them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Account, AccountProfile, Claims, Role, TokenKind, TokenPair, VerificationCode,
};
pub use domain::value_objects::{AuthSession, Registration};
pub use errors::{AuthError, DomainError, DomainResult, StoreError, TokenError};
pub use repositories::{AccountRepository, InMemoryAccountRepository};
pub use services::*;

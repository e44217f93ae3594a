//! Credential store module
//!
//! Verification codes and refresh sessions live in a key/value store with
//! absolute expiry. `CredentialStore` is the raw backend seam (Redis or
//! in-memory, implemented in the infrastructure crate); `CredentialVault`
//! layers the key scheme, TTLs and per-call timeouts on top of it.

mod config;
mod traits;
mod vault;


pub use config::CredentialVaultConfig;
pub use traits::CredentialStore;
pub use vault::{refresh_key, verification_key, CredentialVault};

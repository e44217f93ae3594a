//! Configuration for the credential vault

use std::time::Duration;

use sk_shared::{AuthConfig, CacheConfig};

use crate::domain::entities::{DEFAULT_CODE_TTL_SECONDS, REFRESH_TOKEN_EXPIRY_SECONDS};

#[derive(Debug, Clone)]
pub struct CredentialVaultConfig {
    /// Lifetime of a stored verification code
    pub verification_ttl_seconds: u64,
    /// Lifetime of the stored refresh session
    pub refresh_ttl_seconds: u64,
    /// Upper bound on every store call
    pub operation_timeout: Duration,
}

impl Default for CredentialVaultConfig {
    fn default() -> Self {
        Self {
            verification_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            refresh_ttl_seconds: REFRESH_TOKEN_EXPIRY_SECONDS as u64,
            operation_timeout: Duration::from_millis(2000),
        }
    }
}

impl CredentialVaultConfig {
    pub fn from_settings(auth: &AuthConfig, cache: &CacheConfig) -> Self {
        Self {
            verification_ttl_seconds: auth.verification_code_ttl,
            refresh_ttl_seconds: auth.jwt.refresh_token_expiry.max(1) as u64,
            operation_timeout: Duration::from_millis(cache.operation_timeout_ms),
        }
    }
}

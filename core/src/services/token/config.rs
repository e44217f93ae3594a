//! Configuration for the token codec

use sk_shared::JwtConfig;

use crate::domain::entities::{ACCESS_TOKEN_EXPIRY_SECONDS, REFRESH_TOKEN_EXPIRY_SECONDS};

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// Secret for access tokens
    pub access_secret: String,
    /// Secret for refresh tokens; must differ from `access_secret`
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_seconds: i64,
    /// `iss` claim written and required on every token
    pub issuer: String,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenCodecConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_ttl_seconds: if config.access_token_expiry > 0 {
                config.access_token_expiry
            } else {
                ACCESS_TOKEN_EXPIRY_SECONDS
            },
            refresh_ttl_seconds: if config.refresh_token_expiry > 0 {
                config.refresh_token_expiry
            } else {
                REFRESH_TOKEN_EXPIRY_SECONDS
            },
            issuer: config.issuer.clone(),
        }
    }
}

impl TokenCodecConfig {
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }
}

//! Configuration for the authentication service

use sk_shared::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor for new passwords
    pub bcrypt_cost: u32,
    /// Shortest accepted password
    pub min_password_length: usize,
    /// Whether new accounts may register
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            min_password_length: 6,
            allow_registration: true,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
            allow_registration: config.allow_registration,
            ..Default::default()
        }
    }
}

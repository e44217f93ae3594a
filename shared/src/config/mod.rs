//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token secrets and lifetimes, password and verification policy
//! - `cache` - credential store backend and Redis connection
//! - `database` - account store database connection
//! - `email` - outbound email delivery
//! - `environment` - environment detection and logging
//! - `server` - HTTP server, WebSocket heartbeat and CORS

pub mod auth;
pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use auth::{AuthConfig, JwtConfig};
pub use cache::{CacheConfig, CacheType};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    pub cache: CacheConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Fully in-memory configuration used by tests and local demos
    pub fn in_memory() -> Self {
        Self {
            cache: CacheConfig::memory(),
            ..Default::default()
        }
    }

    /// Reject configurations the server must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.auth.jwt;
        if jwt.access_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if jwt.refresh_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_REFRESH_SECRET"));
        }
        if jwt.access_secret == jwt.refresh_secret {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_SECRET",
                reason: "must differ from JWT_SECRET".to_string(),
            });
        }
        if jwt.access_token_expiry <= 0 || jwt.refresh_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_TOKEN_EXPIRY",
                reason: "token lifetimes must be positive".to_string(),
            });
        }
        if self.environment.is_production() && jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: "development secrets are not allowed in production".to_string(),
            });
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: format!("{} is outside 4..=31", self.auth.bcrypt_cost),
            });
        }
        if self.email.provider == EmailProvider::Http && self.email.api_url.is_none() {
            return Err(ConfigError::Missing("EMAIL_API_URL"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
        assert_eq!(AppConfig::in_memory().cache.cache_type, CacheType::Memory);
    }

    #[test]
    fn test_equal_secrets_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt = JwtConfig::new("same", "same");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt.refresh_secret.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("JWT_REFRESH_SECRET"))
        ));
    }

    #[test]
    fn test_default_secrets_rejected_in_production() {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;
        assert!(config.validate().is_err());

        config.auth.jwt = JwtConfig::new("prod-access", "prod-refresh");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_email_requires_url() {
        let mut config = AppConfig::default();
        config.email.provider = EmailProvider::Http;
        assert!(matches!(config.validate(), Err(ConfigError::Missing("EMAIL_API_URL"))));
    }
}

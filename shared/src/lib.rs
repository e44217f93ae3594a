//! Shared configuration and response types for the SkillLink server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration loaded from the environment
//! - Error response body and error codes
//! - The success response envelope

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CacheType, CorsConfig, DatabaseConfig, EmailConfig,
    EmailProvider, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ConfigError, ErrorResponse};
pub use types::ApiResponse;

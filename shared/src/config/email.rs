//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Write messages to the log instead of sending them
    Log,
    /// POST messages as JSON to an HTTP delivery API
    Http,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "console" => Ok(EmailProvider::Log),
            "http" | "api" => Ok(EmailProvider::Http),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,

    /// Delivery endpoint for the `http` provider
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer key for the `http` provider
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Sender address
    pub from_address: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Log,
            api_url: None,
            api_key: None,
            from_address: String::from("SkillLink <no-reply@skilllink.dev>"),
            timeout_seconds: default_timeout(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let provider = std::env::var("EMAIL_PROVIDER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.provider);

        Self {
            provider,
            api_url: std::env::var("EMAIL_API_URL").ok(),
            api_key: std::env::var("EMAIL_API_KEY").ok(),
            from_address: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_address),
            timeout_seconds: std::env::var("EMAIL_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

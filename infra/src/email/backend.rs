//! Email sender selected at startup

use async_trait::async_trait;

use sk_core::{EmailMessage, EmailSender};
use sk_shared::{EmailConfig, EmailProvider};

use super::http_sender::HttpEmailSender;
use super::log_sender::LogEmailSender;
use crate::InfrastructureError;

/// The configured email sender
#[derive(Clone)]
pub enum EmailBackend {
    Http(HttpEmailSender),
    Log(LogEmailSender),
}

impl EmailBackend {
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let backend = match config.provider {
            EmailProvider::Http => Self::Http(HttpEmailSender::new(config)?),
            EmailProvider::Log => Self::Log(LogEmailSender),
        };
        tracing::info!(provider = backend.kind(), "Email sender initialized");
        Ok(backend)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Log(_) => "log",
        }
    }
}

#[async_trait]
impl EmailSender for EmailBackend {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        match self {
            Self::Http(sender) => sender.send(message).await,
            Self::Log(sender) => sender.send(message).await,
        }
    }
}

//! Outbound email integration

use async_trait::async_trait;

/// A rendered email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Trait for email delivery integration
///
/// Delivery is best-effort: callers log failures and never surface them.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver `message`, returning a provider message id
    async fn send(&self, message: &EmailMessage) -> Result<String, String>;
}

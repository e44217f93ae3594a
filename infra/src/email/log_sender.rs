//! Development sender that writes the email to the log

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use sk_core::domain::entities::mask_email;
use sk_core::{EmailMessage, EmailSender};

/// Logs the message instead of delivering it
///
/// The body contains the verification code, so local development can read
/// the code straight from the server log.
#[derive(Clone, Debug, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        let message_id = format!("log-{}", Uuid::new_v4());
        info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            body = %message.html_body,
            message_id = %message_id,
            "email delivery stub"
        );
        Ok(message_id)
    }
}

//! Email delivery through a transactional email HTTP API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use sk_core::domain::entities::mask_email;
use sk_core::{EmailMessage, EmailSender};
use sk_shared::EmailConfig;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    id: Option<String>,
}

/// Posts each message as JSON to the configured provider endpoint
#[derive(Clone)]
pub struct HttpEmailSender {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    from_address: String,
}

impl HttpEmailSender {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let api_url = config
            .api_url
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_API_URL is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<String, String> {
        let body = OutboundEmail {
            from: &self.from_address,
            to: &message.to,
            subject: &message.subject,
            html: &message.html_body,
        };

        let mut request = self.client.post(&self.api_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(to = %mask_email(&message.to), "Email request failed: {}", e);
            e.to_string()
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(
                to = %mask_email(&message.to),
                status = status.as_u16(),
                "Email provider rejected message: {}",
                detail
            );
            return Err(format!("email provider returned {}", status));
        }

        let message_id = response
            .json::<ProviderResponse>()
            .await
            .ok()
            .and_then(|r| r.id)
            .unwrap_or_default();

        info!(
            to = %mask_email(&message.to),
            message_id = %message_id,
            "Email accepted by provider"
        );
        Ok(message_id)
    }
}

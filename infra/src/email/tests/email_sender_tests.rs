use sk_core::{EmailMessage, EmailSender};
use sk_shared::{EmailConfig, EmailProvider};

use crate::email::{EmailBackend, HttpEmailSender, LogEmailSender};
use crate::InfrastructureError;

fn message() -> EmailMessage {
    EmailMessage {
        to: "jane@example.com".to_string(),
        subject: "Verify Your SkillLink Account".to_string(),
        html_body: "<p>123456</p>".to_string(),
    }
}

#[tokio::test]
async fn test_log_sender_returns_message_id() {
    let id = LogEmailSender.send(&message()).await.unwrap();
    assert!(id.starts_with("log-"));
}

#[test]
fn test_backend_defaults_to_log() {
    let backend = EmailBackend::from_config(&EmailConfig::default()).unwrap();
    assert_eq!(backend.kind(), "log");
}

#[test]
fn test_http_sender_requires_url() {
    let config = EmailConfig {
        provider: EmailProvider::Http,
        api_url: None,
        ..Default::default()
    };

    assert!(matches!(
        HttpEmailSender::new(&config),
        Err(InfrastructureError::Config(_))
    ));
    assert!(EmailBackend::from_config(&config).is_err());
}

#[tokio::test]
async fn test_http_sender_reports_unreachable_provider() {
    let config = EmailConfig {
        provider: EmailProvider::Http,
        api_url: Some("http://127.0.0.1:9/send".to_string()),
        timeout_seconds: 2,
        ..Default::default()
    };
    let backend = EmailBackend::from_config(&config).unwrap();
    assert_eq!(backend.kind(), "http");

    assert!(backend.send(&message()).await.is_err());
}

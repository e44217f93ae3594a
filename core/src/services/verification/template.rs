//! Verification email rendering

use crate::domain::entities::VerificationCode;

use super::traits::EmailMessage;

/// Escape text for inclusion in HTML element content
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn verification_email(
    app_name: &str,
    to: &str,
    name: &str,
    code: &VerificationCode,
    ttl_seconds: u64,
) -> EmailMessage {
    let minutes = (ttl_seconds / 60).max(1);
    let html_body = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #2563eb;">Welcome to {app}!</h2>
  <p>Hi {name},</p>
  <p>Thank you for signing up. Please use the following code to verify your email address:</p>
  <div style="background: #f3f4f6; padding: 20px; text-align: center; font-size: 32px; letter-spacing: 8px; font-weight: bold;">{code}</div>
  <p>This code will expire in {minutes} minutes.</p>
  <p>If you didn't create an account, please ignore this email.</p>
</div>"#,
        app = escape_html(app_name),
        name = escape_html(name),
        code = code.as_str(),
        minutes = minutes,
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("Verify Your {} Account", app_name),
        html_body,
    }
}

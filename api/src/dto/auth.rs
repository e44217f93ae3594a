//! Request bodies for the authentication endpoints

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use sk_core::{RegisterAccount, Role};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 100, message = "Name must be 2 to 100 characters"))]
    pub name: String,

    /// `CLIENT` or `FREELANCER`
    pub role: Role,

    #[validate(length(max = 2000))]
    pub bio: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    #[validate(custom = "validate_portfolio_links")]
    pub portfolio_links: Vec<String>,
}

/// Every portfolio entry must be an absolute URL
fn validate_portfolio_links(links: &[String]) -> Result<(), ValidationError> {
    if links.iter().all(|link| validator::validate_url(link.as_str())) {
        return Ok(());
    }
    let mut error = ValidationError::new("url");
    error.message = Some("Each portfolio link must be a valid URL".into());
    Err(error)
}

impl From<RegisterRequest> for RegisterAccount {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            name: request.name,
            role: request.role,
            bio: request.bio,
            skills: request.skills,
            portfolio_links: request.portfolio_links,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, message = "Verification code is required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token required"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "not-an-email",
            "password": "123",
            "name": "",
            "role": "CLIENT"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("name"));
        assert!(request.skills.is_empty());
    }

    #[test]
    fn test_register_request_name_and_links() {
        let mut request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "a@b.io",
            "password": "123456",
            "name": "A",
            "role": "FREELANCER",
            "portfolioLinks": ["https://example.com/work", "not a url"]
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("portfolio_links"));

        request.name = "Al".to_string();
        request.portfolio_links = vec!["https://example.com/work".to_string()];
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_unknown_role() {
        let result = serde_json::from_value::<RegisterRequest>(serde_json::json!({
            "email": "a@b.io",
            "password": "123456",
            "name": "A",
            "role": "OWNER"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_email_request_uses_camel_case() {
        let id = Uuid::new_v4();
        let request: VerifyEmailRequest =
            serde_json::from_value(serde_json::json!({ "userId": id, "code": "123456" })).unwrap();
        assert_eq!(request.user_id, id);
        assert!(request.validate().is_ok());
    }
}

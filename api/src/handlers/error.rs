//! Domain error to HTTP response mapping

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use sk_core::{AuthError, DomainError, StoreError, TokenError};
use sk_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Status code and error code for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::AccountNotFound => (StatusCode::BAD_REQUEST, error_codes::ACCOUNT_NOT_FOUND),
            AuthError::AccountAlreadyExists => (StatusCode::CONFLICT, error_codes::ACCOUNT_EXISTS),
            AuthError::AlreadyVerified => (StatusCode::BAD_REQUEST, error_codes::ALREADY_VERIFIED),
            AuthError::InvalidOrExpiredCode => {
                (StatusCode::BAD_REQUEST, error_codes::VERIFICATION_CODE_INVALID)
            }
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS)
            }
            AuthError::EmailNotVerified => (StatusCode::FORBIDDEN, error_codes::EMAIL_NOT_VERIFIED),
            AuthError::InvalidRefreshToken => {
                (StatusCode::UNAUTHORIZED, error_codes::REFRESH_TOKEN_INVALID)
            }
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_MISSING),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
        },
        DomainError::Token(TokenError::GenerationFailed { .. }) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
        DomainError::Token(_) => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Store(_) => (StatusCode::SERVICE_UNAVAILABLE, error_codes::CACHE_ERROR),
        DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

/// Convert a domain error into the JSON error response
///
/// Infrastructure faults are logged with their detail and answered with a
/// generic message; client faults echo the domain message.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = classify(error);

    let message = if error.is_client_fault() {
        error.to_string()
    } else {
        tracing::error!(error = %error, event = "request_failed", "Request failed");
        match error {
            DomainError::Store(_) => "Service temporarily unavailable, please retry".to_string(),
            _ => "An internal error occurred".to_string(),
        }
    };

    let mut response = ErrorResponse::new(code, message);
    if let DomainError::Store(StoreError::Timeout { operation, .. }) = error {
        response = response.add_detail("operation", operation);
    }
    HttpResponse::build(status).json(response)
}

/// 400 response listing the failing fields
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }
    HttpResponse::BadRequest().json(response)
}

/// Turns malformed JSON bodies into the standard error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string());
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::from(AuthError::AlreadyVerified), StatusCode::BAD_REQUEST),
            (DomainError::from(AuthError::InvalidOrExpiredCode), StatusCode::BAD_REQUEST),
            (DomainError::from(AuthError::AccountNotFound), StatusCode::BAD_REQUEST),
            (DomainError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (DomainError::from(AuthError::InvalidRefreshToken), StatusCode::UNAUTHORIZED),
            (DomainError::from(AuthError::MissingToken), StatusCode::UNAUTHORIZED),
            (DomainError::from(AuthError::EmailNotVerified), StatusCode::FORBIDDEN),
            (DomainError::from(AuthError::AccountAlreadyExists), StatusCode::CONFLICT),
            (
                DomainError::from(StoreError::Timeout { operation: "get", after_ms: 2000 }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(classify(&error).0, expected, "{:?}", error);
        }
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let response = handle_domain_error(&DomainError::internal("db password wrong"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Bearer access token extractor for protected endpoints.

use std::future::{ready, Ready};

use actix_web::{
    error::InternalError, http::header::AUTHORIZATION, web, Error, FromRequest, HttpRequest,
};
use uuid::Uuid;

use sk_core::{AuthError, DomainError, TokenCodec, TokenKind};

use crate::handlers::handle_domain_error;

/// Authenticated caller, extracted from `Authorization: Bearer <access token>`
///
/// Only the token is checked here; handlers that need the account load it
/// through the service and surface `AccountNotFound` themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub account_id: Uuid,
}

impl AuthContext {
    /// Verify a raw header value against `codec`
    pub fn from_header(header: Option<&str>, codec: &TokenCodec) -> Result<Self, AuthError> {
        let token = header
            .and_then(extract_bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let account_id = codec.verify(token, TokenKind::Access).map_err(|e| {
            tracing::debug!(reason = %e, event = "access_token_rejected", "Access token rejected");
            AuthError::InvalidToken
        })?;

        Ok(Self { account_id })
    }
}

/// Token part of a `Bearer` header value, if non-empty
pub fn extract_bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let Some(codec) = req.app_data::<web::Data<TokenCodec>>() else {
            let error = DomainError::internal("token codec not configured");
            let response = handle_domain_error(&error);
            return ready(Err(InternalError::from_response(error, response).into()));
        };

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        ready(
            AuthContext::from_header(header, codec).map_err(|e| {
                let response = handle_domain_error(&DomainError::from(e.clone()));
                InternalError::from_response(e, response).into()
            }),
        )
    }
}

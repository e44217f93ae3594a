use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use std::time::Duration;

use sk_core::{AccountRepository, CredentialStore, EmailSender};

use crate::app::AppState;
use crate::handlers::handle_domain_error;

use super::session::TaskChannelSession;

#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// Handler for GET /ws
///
/// The access token is read from the `?token=` query parameter only; an
/// `Authorization` header is ignored. It is verified before the upgrade, so a
/// rejected client gets a plain 401 and no socket is opened.
pub async fn connect<A, S, E>(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<ConnectQuery>,
    state: web::Data<AppState<A, S, E>>,
) -> Result<HttpResponse, actix_web::Error>
where
    A: AccountRepository + 'static,
    S: CredentialStore + 'static,
    E: EmailSender + 'static,
{
    let admitted = match state.gate.admit(query.token.as_deref()).await {
        Ok(admitted) => admitted,
        Err(error) => return Ok(handle_domain_error(&error)),
    };

    let (handle, outbound) = state.broadcaster.connect(&admitted);
    tracing::info!(
        connection_id = %handle.id,
        account_id = %handle.account_id,
        event = "ws_connected",
        "WebSocket connection admitted"
    );

    let session = TaskChannelSession::new(
        handle,
        state.broadcaster.clone(),
        outbound,
        Duration::from_secs(state.server.ws_heartbeat_interval),
        Duration::from_secs(state.server.ws_client_timeout),
    );

    let response = ws::start(session, &req, stream);
    if response.is_err() {
        // the actor never started, so `stopped` will not clean up
        state.broadcaster.disconnect(&handle);
    }
    response
}

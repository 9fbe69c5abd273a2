//! Stateless HTTP transport for Actix-Web.
//!
//! Each POST body is one JSON-RPC message, decoded by the same path as a stdio
//! line. Framing failures answer 400 with a JSON-RPC error body, notifications
//! answer 202 with no body, everything else answers 200.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::mcp::rpc::{OutboundResponse, INVALID_REQUEST, PARSE_ERROR};
use crate::mcp::service::McpService;

/// Shared app data for the HTTP routes.
pub struct McpState {
    pub service: McpService,
}

impl McpState {
    pub fn new(service: McpService) -> Self {
        Self { service }
    }
}

/// POST /mcp
pub async fn post_message(state: web::Data<McpState>, body: web::Bytes) -> HttpResponse {
    let raw = match std::str::from_utf8(&body) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        Ok(_) => return reply(OutboundResponse::parse_error("empty request body")),
        Err(err) => return reply(OutboundResponse::parse_error(err.to_string())),
    };

    match state.service.handle_message(raw).await {
        Some(response) => reply(response),
        None => HttpResponse::Accepted().finish(),
    }
}

fn reply(response: OutboundResponse) -> HttpResponse {
    let status = status_for(&response);
    if status != StatusCode::OK {
        log::debug!("rejecting message with HTTP {}", status.as_u16());
    }
    HttpResponse::build(status).json(response)
}

/// Messages that never reached dispatch are the client's fault at the HTTP
/// level too. Method-level errors still travel in a 200.
fn status_for(response: &OutboundResponse) -> StatusCode {
    match response.error.as_ref().map(|error| error.code) {
        Some(PARSE_ERROR) | Some(INVALID_REQUEST) => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    }
}

/// Route table. `/sse` is kept for clients configured with the legacy path.
pub fn config(cfg: &mut web::ServiceConfig) {
    for path in ["/mcp", "/sse"] {
        cfg.service(web::resource(path).route(web::post().to(post_message)));
    }
}

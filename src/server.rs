//! HTTP surface: the axum router and the serving loop.
//!
//! Thin by design — the router adapts real HTTP requests into the
//! transport-neutral envelope and hands them to [`Gateway::handle`], which
//! owns all semantics including method rejection and the preflight branch.
//! That is why `/convert` is bound with `any()` rather than `post()`: a 405
//! here must still carry the gateway's JSON body and header set, which
//! axum's own method-routing rejection would not.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::handler::Gateway;
use crate::request::GatewayRequest;
use crate::response::GatewayResponse;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::Method,
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

/// Build the application router.
///
/// Routes:
/// - `POST /convert` — the conversion endpoint (all methods reach the
///   gateway; it answers OPTIONS preflights and rejects the rest with 405)
/// - `GET /healthz` — liveness probe
pub fn build_router(gateway: Arc<Gateway>) -> Router {
    let transport_limit = gateway.config().max_transport_bytes();

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/convert", any(convert_entry))
        .layer(DefaultBodyLimit::max(transport_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(gateway)
}

/// Adapt one HTTP request into the gateway envelope.
///
/// A raw HTTP server never base64-encodes bodies in flight, so
/// `is_base64_encoded` is always false on this path; the flag exists for
/// envelope-style hosts and for tests that exercise that branch directly.
async fn convert_entry(
    State(gateway): State<Arc<Gateway>>,
    method: Method,
    body: Bytes,
) -> GatewayResponse {
    let body = if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&body).into_owned())
    };

    gateway
        .handle(GatewayRequest {
            method,
            body,
            is_base64_encoded: false,
        })
        .await
}

/// Probe the converter, bind `addr`, and serve until the process exits.
pub async fn serve(config: GatewayConfig, addr: SocketAddr) -> Result<(), GatewayError> {
    let gateway = Arc::new(Gateway::new(config).await);
    let router = build_router(gateway);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| GatewayError::Internal(format!("bind {addr}: {e}")))?;
    info!(%addr, "doc2md-gateway listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| GatewayError::Internal(format!("server: {e}")))
}

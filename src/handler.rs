//! The request gate and stage orchestration.
//!
//! [`Gateway::handle`] is the single entry point for one invocation. It is
//! transport-neutral — the axum adapter in [`crate::server`] and the tests
//! both call it with a [`GatewayRequest`] — and it always returns a
//! [`GatewayResponse`]: every error is converted to its wire shape here,
//! so callers never see a `Result`.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::pipeline::convert::{failure_document, resolve_converter, DocumentConverter};
use crate::pipeline::{decode, spool::SpooledFile, validate};
use crate::request::{GatewayRequest, UploadRequest};
use crate::response::GatewayResponse;
use axum::http::Method;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// One gateway instance: configuration plus the converter selected at
/// startup.
///
/// Cheap to clone behind an `Arc`; holds no per-request state. Concurrent
/// invocations each own their spooled file and share nothing mutable.
pub struct Gateway {
    config: GatewayConfig,
    converter: Arc<dyn DocumentConverter>,
}

impl Gateway {
    /// Construct a gateway, probing the external converter once.
    pub async fn new(config: GatewayConfig) -> Self {
        let converter = resolve_converter(&config).await;
        Self { config, converter }
    }

    /// Construct a gateway with an explicit converter, skipping the probe.
    pub fn with_converter(config: GatewayConfig, converter: Arc<dyn DocumentConverter>) -> Self {
        Self { config, converter }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Process one invocation end to end.
    ///
    /// Never returns an error: request-level failures become their mapped
    /// 4xx/5xx wire shape, and conversion failures are recovered into a
    /// descriptive document with status 200.
    pub async fn handle(&self, request: GatewayRequest) -> GatewayResponse {
        let max_age = self.config.cors_max_age_secs;
        match self.process(request).await {
            Ok(response) => response,
            Err(err) => {
                if err.status_code().is_server_error() {
                    error!(error = %err, "request failed");
                } else {
                    debug!(error = %err, "request rejected");
                }
                GatewayResponse::from_error(&err, max_age)
            }
        }
    }

    async fn process(&self, request: GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        // ── Step 1: Method gate ──────────────────────────────────────────
        if request.method == Method::OPTIONS {
            return Ok(GatewayResponse::preflight(self.config.cors_max_age_secs));
        }
        if request.method != Method::POST {
            return Err(GatewayError::MethodNotAllowed {
                method: request.method.to_string(),
            });
        }

        // ── Step 2: Transport decode + JSON parse ────────────────────────
        let body = decode_transport_body(&request)?;
        if body.trim().is_empty() {
            return Err(GatewayError::MissingBody);
        }
        let upload: UploadRequest =
            serde_json::from_str(&body).map_err(|e| GatewayError::InvalidJson {
                detail: e.to_string(),
            })?;
        if upload.file_data.is_empty() {
            return Err(GatewayError::MissingFileData);
        }

        // ── Step 3: Validate before touching the filesystem ──────────────
        validate::validate_file_name(&upload.file_name)?;
        let extension = validate::validate_extension(&upload.file_name)?;
        let bytes = decode::decode_payload(&upload.file_data, self.config.max_decoded_bytes)?;

        info!(
            file_name = %upload.file_name,
            size = bytes.len(),
            converter = self.converter.name(),
            "processing upload"
        );

        // ── Step 4: Spool and convert ────────────────────────────────────
        // The spooled file lives exactly as long as the conversion needs it;
        // the drop below removes it before the response exists.
        let spooled = SpooledFile::write(&bytes, &extension)?;
        let markdown = match self.converter.convert(spooled.path()).await {
            Ok(markdown) => markdown,
            Err(failure) => {
                // Recovered outcome: the client gets an explanatory document,
                // the log gets the detail.
                warn!(
                    file_name = %upload.file_name,
                    converter = self.converter.name(),
                    error = %failure,
                    "conversion failed, returning recovery document"
                );
                failure_document(&upload.file_name, bytes.len())
            }
        };
        drop(spooled);

        // ── Step 5: Respond ──────────────────────────────────────────────
        Ok(GatewayResponse::success(
            &markdown,
            &upload.file_name,
            self.config.cors_max_age_secs,
        ))
    }
}

/// Undo transport-level base64 encoding when the envelope flags it.
///
/// API-gateway-style hosts deliver binary-safe bodies base64-encoded with
/// `is_base64_encoded` set; a body that fails to decode under that flag is
/// treated the same as unparseable JSON.
fn decode_transport_body(request: &GatewayRequest) -> Result<String, GatewayError> {
    let raw = request.body.clone().unwrap_or_default();
    if !request.is_base64_encoded {
        return Ok(raw);
    }
    let bytes = STANDARD
        .decode(raw.trim())
        .map_err(|e| GatewayError::InvalidJson {
            detail: format!("transport body is not valid base64: {e}"),
        })?;
    String::from_utf8(bytes).map_err(|e| GatewayError::InvalidJson {
        detail: format!("transport body is not UTF-8: {e}"),
    })
}

//! Error types for the doc2md-gateway library.
//!
//! Two distinct failure modes exist and only one of them is an error here:
//!
//! * [`GatewayError`] — the request could not be processed at all (wrong
//!   method, bad JSON, unsafe filename, oversized payload). Mapped to a
//!   4xx/5xx response with a fixed client-visible message.
//!
//! * A **conversion failure** is deliberately *not* a `GatewayError`. The
//!   request itself was fine; the converter could not handle the document.
//!   It is recovered into a descriptive Markdown document and returned with
//!   status 200 (see [`crate::pipeline::convert::ConversionFailure`]).
//!
//! `Display` strings carry diagnostic detail and are meant for logs.
//! [`GatewayError::user_message`] is what clients see — internal detail
//! (paths, parser output, converter stderr) never crosses that boundary.

use axum::http::StatusCode;
use thiserror::Error;

/// All request-level errors returned by the gateway pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    // ── Request gate ──────────────────────────────────────────────────────
    /// HTTP method other than POST or OPTIONS.
    #[error("method {method} not allowed on the convert endpoint")]
    MethodNotAllowed { method: String },

    /// Request arrived with no body (or an all-whitespace body).
    #[error("request body is missing or empty")]
    MissingBody,

    /// The body was present but not parseable as the upload JSON.
    #[error("request body is not valid JSON: {detail}")]
    InvalidJson { detail: String },

    /// The upload JSON had no usable `fileData` field.
    #[error("fileData field is missing or empty")]
    MissingFileData,

    // ── Input validation ──────────────────────────────────────────────────
    /// Filename is empty, too long, or contains path/metacharacters.
    #[error("rejected unsafe file name {name:?}")]
    InvalidFileName { name: String },

    /// Extension is missing or outside the allow-list.
    #[error("file extension {extension:?} is not in the allow-list")]
    UnsupportedExtension { extension: String },

    /// The `fileData` payload did not decode as base64.
    #[error("payload is not valid base64: {detail}")]
    InvalidBase64 { detail: String },

    /// Decoded payload exceeds the configured ceiling.
    #[error("decoded payload is {size} bytes, ceiling is {limit} bytes")]
    FileTooLarge { size: usize, limit: usize },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (temp file I/O, bind failure, …).
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::MissingBody
            | GatewayError::InvalidJson { .. }
            | GatewayError::MissingFileData
            | GatewayError::InvalidFileName { .. }
            | GatewayError::UnsupportedExtension { .. }
            | GatewayError::InvalidBase64 { .. } => StatusCode::BAD_REQUEST,
            GatewayError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::InvalidConfig(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The client-visible message.
    ///
    /// Deliberately coarser than `Display`: the wire messages are part of
    /// the API contract and must not leak internal detail.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::MethodNotAllowed { .. } => "Method not allowed".to_string(),
            GatewayError::MissingBody => "Request body is required".to_string(),
            GatewayError::InvalidJson { .. } => "Invalid JSON in request body".to_string(),
            GatewayError::MissingFileData => "fileData is required".to_string(),
            GatewayError::InvalidFileName { .. } => "Invalid file name".to_string(),
            GatewayError::UnsupportedExtension { .. } => "File type not supported".to_string(),
            GatewayError::InvalidBase64 { .. } => "Invalid base64 data".to_string(),
            GatewayError::FileTooLarge { limit, .. } => {
                const MIB: usize = 1024 * 1024;
                if *limit >= MIB && limit % MIB == 0 {
                    format!("File size exceeds {}MB limit", limit / MIB)
                } else {
                    format!("File size exceeds {limit} byte limit")
                }
            }
            GatewayError::InvalidConfig(_) | GatewayError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

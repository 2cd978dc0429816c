//! Response envelope: JSON bodies plus the fixed header set.
//!
//! Every response the gateway produces — success, validation error,
//! preflight acknowledgment, internal error — carries the same CORS and
//! security headers. Stamping them here, in the envelope itself, is what
//! makes that guarantee hold: there is no code path that builds a response
//! without going through this module, and the contract stays testable
//! without any HTTP middleware in the loop.

use crate::error::GatewayError;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Header set applied to every response.
///
/// `access-control-max-age` is appended separately because its value comes
/// from configuration; everything in this table is fixed.
const BASE_HEADERS: [(&str, &str); 8] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
    ("content-type", "application/json"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    ),
];

/// One outgoing invocation result: status, headers, serialized JSON body.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: String,
    cors_max_age_secs: u64,
}

impl GatewayResponse {
    /// Successful conversion: `{"success":true,"markdown":…,"fileName":…}`.
    pub fn success(markdown: &str, file_name: &str, cors_max_age_secs: u64) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({
                "success": true,
                "markdown": markdown,
                "fileName": file_name,
            })
            .to_string(),
            cors_max_age_secs,
        }
    }

    /// Preflight acknowledgment: 200 with an empty JSON object.
    pub fn preflight(cors_max_age_secs: u64) -> Self {
        Self {
            status: StatusCode::OK,
            body: "{}".to_string(),
            cors_max_age_secs,
        }
    }

    /// Error response: mapped status plus `{"error":"<user message>"}`.
    ///
    /// Uses [`GatewayError::user_message`], never `Display` — the wire body
    /// is a contract, the `Display` text is for logs.
    pub fn from_error(err: &GatewayError, cors_max_age_secs: u64) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "error": err.user_message() }).to_string(),
            cors_max_age_secs,
        }
    }

    /// The full header set for this response, in emission order.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = BASE_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        out.push((
            "access-control-max-age".to_string(),
            self.cors_max_age_secs.to_string(),
        ));
        out
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let header_list = self.headers();
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();
        for (name, value) in header_list {
            // All names/values are static or numeric; parse cannot fail.
            if let (Ok(n), Ok(v)) = (
                name.parse::<HeaderName>(),
                HeaderValue::from_str(&value),
            ) {
                headers.insert(n, v);
            }
        }
        response
    }
}

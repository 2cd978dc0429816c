//! Transport-neutral request envelope and the upload wire type.
//!
//! The whole pipeline operates on [`GatewayRequest`] rather than on a
//! framework request type. Hosting environments differ in how they present
//! a request (a raw HTTP server passes the body through; API-gateway-style
//! hosts base64-encode it and say so with a flag), and tests want to drive
//! the pipeline without a socket. The axum adapter in [`crate::server`]
//! builds one of these per request.

use axum::http::Method;
use serde::Deserialize;

/// One incoming invocation, reduced to what the gateway cares about.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    /// HTTP method of the invocation.
    pub method: Method,
    /// Raw request body, if any.
    pub body: Option<String>,
    /// Whether the transport base64-encoded `body` in flight.
    pub is_base64_encoded: bool,
}

impl GatewayRequest {
    /// A plain POST carrying `body` verbatim.
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    /// A CORS preflight request.
    pub fn options() -> Self {
        Self {
            method: Method::OPTIONS,
            body: None,
            is_base64_encoded: false,
        }
    }
}

/// The upload payload clients POST to the convert endpoint.
///
/// Both fields default to empty so that *which* field is missing is decided
/// by the validators (and produces the specific error message) instead of by
/// serde's generic "missing field" parse error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Base64-encoded file content.
    #[serde(default)]
    pub file_data: String,
    /// Original filename, used for extension routing and echoed back.
    #[serde(default)]
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_request_parses_camel_case() {
        let u: UploadRequest =
            serde_json::from_str(r#"{"fileData":"aGVsbG8=","fileName":"a.txt"}"#).unwrap();
        assert_eq!(u.file_data, "aGVsbG8=");
        assert_eq!(u.file_name, "a.txt");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let u: UploadRequest = serde_json::from_str("{}").unwrap();
        assert!(u.file_data.is_empty());
        assert!(u.file_name.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let u: UploadRequest =
            serde_json::from_str(r#"{"fileData":"eA==","fileName":"a.md","extra":1}"#).unwrap();
        assert_eq!(u.file_name, "a.md");
    }
}

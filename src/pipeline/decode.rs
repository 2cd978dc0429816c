//! Payload decoding: strict base64 plus the size ceiling.
//!
//! The strict engine is deliberate: a payload with stray whitespace or a
//! bad padding tail is a malformed client, and rejecting it early gives a
//! clear 400 instead of silently converting garbage bytes downstream.

use crate::error::GatewayError;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Decode the upload payload and enforce the decoded-size ceiling.
///
/// The ceiling is checked on the *decoded* length — that is the number of
/// bytes that would hit the disk and the converter, and it is what the
/// client-visible limit message talks about.
pub fn decode_payload(file_data: &str, limit: usize) -> Result<Vec<u8>, GatewayError> {
    let bytes = STANDARD
        .decode(file_data)
        .map_err(|e| GatewayError::InvalidBase64 {
            detail: e.to_string(),
        })?;

    if bytes.len() > limit {
        return Err(GatewayError::FileTooLarge {
            size: bytes.len(),
            limit,
        });
    }

    Ok(bytes)
}

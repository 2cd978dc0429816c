//! Configuration for the upload-to-Markdown gateway.
//!
//! All behaviour is controlled through [`GatewayConfig`], built via its
//! [`GatewayConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share across the router state, log it at startup, and diff
//! two deployments to understand why their behaviour differs.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};

/// Default decoded-payload ceiling: 10 MiB.
pub const DEFAULT_MAX_DECODED_BYTES: usize = 10 * 1024 * 1024;

/// Default external converter command probed at startup.
pub const DEFAULT_CONVERTER_COMMAND: &str = "markitdown";

/// Configuration for a [`crate::handler::Gateway`].
///
/// Built via [`GatewayConfig::builder()`] or [`GatewayConfig::default()`].
///
/// # Example
/// ```rust
/// use doc2md_gateway::GatewayConfig;
///
/// let config = GatewayConfig::builder()
///     .max_decoded_bytes(5 * 1024 * 1024)
///     .converter_command("markitdown")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Ceiling on the *decoded* upload size in bytes. Default: 10 MiB.
    ///
    /// Checked after base64 decoding, before any file is written. The
    /// transport body limit is derived from this (see
    /// [`GatewayConfig::max_transport_bytes`]) so oversized requests are
    /// also cut off at the socket rather than buffered in full.
    pub max_decoded_bytes: usize,

    /// External converter command. Default: `"markitdown"`.
    ///
    /// Probed once at startup with `--version`; if the probe fails the
    /// gateway runs in fallback-extraction mode for its whole lifetime.
    pub converter_command: String,

    /// Value for the `access-control-max-age` preflight-cache header,
    /// in seconds. Default: 86400 (one day).
    pub cors_max_age_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            max_decoded_bytes: DEFAULT_MAX_DECODED_BYTES,
            converter_command: DEFAULT_CONVERTER_COMMAND.to_string(),
            cors_max_age_secs: 86_400,
        }
    }
}

impl GatewayConfig {
    /// Create a new builder for `GatewayConfig`.
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder {
            config: Self::default(),
        }
    }

    /// Transport-level body ceiling: the base64 expansion of
    /// `max_decoded_bytes` plus headroom for the JSON envelope.
    ///
    /// base64 inflates content by 4/3; the envelope adds the field names
    /// and the filename. 64 KiB of headroom covers both with room to
    /// spare, while still letting the HTTP layer reject grossly oversized
    /// bodies before they are buffered.
    pub fn max_transport_bytes(&self) -> usize {
        self.max_decoded_bytes / 3 * 4 + 64 * 1024
    }
}

/// Builder for [`GatewayConfig`].
#[derive(Debug)]
pub struct GatewayConfigBuilder {
    config: GatewayConfig,
}

impl GatewayConfigBuilder {
    pub fn max_decoded_bytes(mut self, n: usize) -> Self {
        self.config.max_decoded_bytes = n.max(1);
        self
    }

    pub fn converter_command(mut self, cmd: impl Into<String>) -> Self {
        self.config.converter_command = cmd.into();
        self
    }

    pub fn cors_max_age_secs(mut self, secs: u64) -> Self {
        self.config.cors_max_age_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GatewayConfig, GatewayError> {
        let c = &self.config;
        if c.converter_command.trim().is_empty() {
            return Err(GatewayError::InvalidConfig(
                "converter command must not be empty".into(),
            ));
        }
        if c.max_decoded_bytes == 0 {
            return Err(GatewayError::InvalidConfig(
                "max decoded bytes must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GatewayConfig::default();
        assert_eq!(c.max_decoded_bytes, 10 * 1024 * 1024);
        assert_eq!(c.converter_command, "markitdown");
        assert_eq!(c.cors_max_age_secs, 86_400);
    }

    #[test]
    fn builder_overrides() {
        let c = GatewayConfig::builder()
            .max_decoded_bytes(1024)
            .converter_command("pandoc")
            .cors_max_age_secs(600)
            .build()
            .expect("valid config");
        assert_eq!(c.max_decoded_bytes, 1024);
        assert_eq!(c.converter_command, "pandoc");
        assert_eq!(c.cors_max_age_secs, 600);
    }

    #[test]
    fn empty_converter_command_rejected() {
        let err = GatewayConfig::builder()
            .converter_command("  ")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("converter command"));
    }

    #[test]
    fn transport_ceiling_covers_base64_expansion() {
        let c = GatewayConfig::default();
        // 10 MiB decoded → at least 13.3 MiB on the wire
        assert!(c.max_transport_bytes() > c.max_decoded_bytes * 4 / 3);
    }
}

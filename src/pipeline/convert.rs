//! Conversion delegate: external converter with graceful degradation.
//!
//! The gateway treats document conversion as an opaque capability behind
//! [`DocumentConverter`]. Two implementations exist:
//!
//! * [`ExternalConverter`] — shells out to the configured converter command
//!   (`markitdown <path>` by default) and takes its stdout as the Markdown.
//! * [`FallbackConverter`] — degraded mode when the command is not
//!   installed: `.txt`/`.md` content passes through verbatim, and binary
//!   formats get a generated informational document instead of a hard
//!   failure.
//!
//! Selection happens once per process in [`resolve_converter`] — a cold
//! start probe, not a per-request check. A conversion error is never
//! propagated to the HTTP layer as an error: the caller recovers it into
//! [`failure_document`] and still answers 200, because "this document could
//! not be converted" is a valid, explainable outcome while "this request
//! could not be processed" is not.

use crate::config::GatewayConfig;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// A non-fatal, per-document failure from a converter.
///
/// Carries the full diagnostic detail for logging. The client-visible
/// recovery document is built by [`failure_document`] and does not include
/// this text.
#[derive(Debug, Error)]
#[error("{detail}")]
pub struct ConversionFailure {
    pub detail: String,
}

impl ConversionFailure {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Capability of turning a spooled document into Markdown.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Convert the file at `path` to Markdown text.
    async fn convert(&self, path: &Path) -> Result<String, ConversionFailure>;
}

// ── External command ─────────────────────────────────────────────────────

/// Delegates to an external converter process.
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    command: String,
}

impl ExternalConverter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl DocumentConverter for ExternalConverter {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn convert(&self, path: &Path) -> Result<String, ConversionFailure> {
        let output = Command::new(&self.command)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ConversionFailure::new(format!("spawn {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConversionFailure::new(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        debug!(
            command = %self.command,
            bytes = output.stdout.len(),
            "external conversion succeeded"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

// ── Fallback extraction ──────────────────────────────────────────────────

/// Degraded-mode extraction used when no external converter is installed.
#[derive(Debug, Clone, Default)]
pub struct FallbackConverter;

#[async_trait]
impl DocumentConverter for FallbackConverter {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn convert(&self, path: &Path) -> Result<String, ConversionFailure> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            // Plain text and Markdown are already their own extraction.
            "txt" | "md" => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| ConversionFailure::new(format!("read {}: {e}", path.display())))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            _ => {
                let size = tokio::fs::metadata(path)
                    .await
                    .map(|m| m.len())
                    .map_err(|e| ConversionFailure::new(format!("stat {}: {e}", path.display())))?;
                Ok(info_document(&extension, size))
            }
        }
    }
}

/// Informational document for binary formats in fallback mode.
fn info_document(extension: &str, size: u64) -> String {
    format!(
        "# File information\n\n\
         - Format: .{extension}\n\
         - Size: {size} bytes\n\n\
         *Content extraction for this format requires the external converter, \
         which is not installed on this instance.*\n\n\
         ## Supported formats\n\
         - Microsoft Word (.docx, .doc)\n\
         - Microsoft Excel (.xlsx, .xls)\n\
         - Microsoft PowerPoint (.pptx, .ppt)\n\
         - PDF (.pdf)\n\
         - Plain text (.txt, .md)\n"
    )
}

/// Recovery document returned when the selected converter fails.
///
/// Names the file and its size but not the underlying error — that detail
/// goes to the log, never to the client.
pub fn failure_document(file_name: &str, size: usize) -> String {
    format!(
        "# Conversion failed\n\n\
         The uploaded document could not be converted to Markdown.\n\n\
         ## File information\n\
         - Name: {file_name}\n\
         - Size: {size} bytes\n\n\
         The file may be corrupt, password-protected, or use features the \
         converter does not support.\n"
    )
}

// ── Startup selection ────────────────────────────────────────────────────

/// Probe the configured command once and pick the converter for the
/// lifetime of the process.
///
/// Mirrors a cold-start dependency check: the decision is made when the
/// gateway is constructed, so requests never pay for (or race on) repeated
/// probing. A missing or broken command demotes the whole instance to
/// fallback extraction.
pub async fn resolve_converter(config: &GatewayConfig) -> Arc<dyn DocumentConverter> {
    if probe_command(&config.converter_command).await {
        info!(command = %config.converter_command, "external converter available");
        Arc::new(ExternalConverter::new(config.converter_command.clone()))
    } else {
        warn!(
            command = %config.converter_command,
            "external converter not available, using fallback extraction"
        );
        Arc::new(FallbackConverter)
    }
}

/// Availability probe: `<command> --version` must run and exit 0.
async fn probe_command(command: &str) -> bool {
    Command::new(command)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Build a converter without probing — used by tests and embedders that
/// already know which variant they want.
pub fn fallback_converter() -> Arc<dyn DocumentConverter> {
    Arc::new(FallbackConverter)
}

//! Server binary for doc2md-gateway.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `GatewayConfig` and runs the serving loop.

use anyhow::{Context, Result};
use clap::Parser;
use doc2md_gateway::{serve, GatewayConfig};
use std::io;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Serve on the default port with markitdown as the converter
  doc2md-gateway

  # Different converter command and a 25 MiB upload cap
  doc2md-gateway --converter pandoc --max-upload-mb 25

  # Bind a specific address
  doc2md-gateway --bind 127.0.0.1:9000

ENDPOINTS:
  POST /convert   {"fileData": "<base64>", "fileName": "<name>"}
  GET  /healthz   liveness probe

CONVERTER:
  The converter command is probed once at startup with `--version`.
  If the probe fails the gateway serves in fallback mode: .txt/.md
  uploads pass through verbatim, other formats get an informational
  document instead of extracted content.

ENVIRONMENT VARIABLES:
  DOC2MD_BIND           Bind address (same as --bind)
  DOC2MD_CONVERTER      Converter command (same as --converter)
  DOC2MD_MAX_UPLOAD_MB  Decoded upload cap in MiB (same as --max-upload-mb)
  RUST_LOG              Tracing filter, e.g. doc2md_gateway=debug
"#;

/// Serve an upload-to-Markdown conversion endpoint.
#[derive(Parser, Debug)]
#[command(
    name = "doc2md-gateway",
    version,
    about = "HTTP gateway converting uploaded documents to Markdown",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "DOC2MD_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// External converter command, probed at startup.
    #[arg(long, env = "DOC2MD_CONVERTER", default_value = "markitdown")]
    converter: String,

    /// Decoded upload size cap in MiB.
    #[arg(long, env = "DOC2MD_MAX_UPLOAD_MB", default_value_t = 10)]
    max_upload_mb: usize,

    /// Preflight cache lifetime in seconds (access-control-max-age).
    #[arg(long, env = "DOC2MD_CORS_MAX_AGE", default_value_t = 86_400)]
    cors_max_age: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOC2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOC2MD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = GatewayConfig::builder()
        .max_decoded_bytes(cli.max_upload_mb * 1024 * 1024)
        .converter_command(&cli.converter)
        .cors_max_age_secs(cli.cors_max_age)
        .build()
        .context("Invalid configuration")?;

    // ── Serve ────────────────────────────────────────────────────────────
    serve(config, cli.bind)
        .await
        .context("Server terminated with an error")?;

    Ok(())
}

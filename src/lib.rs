//! # doc2md-gateway
//!
//! A small HTTP gateway that accepts base64-encoded document uploads and
//! returns their content as Markdown.
//!
//! ## Why this crate?
//!
//! Document conversion tooling is heavyweight and usually lives in another
//! runtime entirely. This gateway keeps the HTTP contract — validation,
//! limits, CORS, security headers, guaranteed temp-file cleanup — in one
//! small, testable Rust service and treats the converter itself as an
//! opaque external command. When that command is missing, the service
//! degrades gracefully instead of failing: plain text passes through, and
//! binary formats get an explanatory document.
//!
//! ## Pipeline Overview
//!
//! ```text
//! POST {fileData, fileName}
//!  │
//!  ├─ 1. Gate      method check, preflight, transport decode, JSON parse
//!  ├─ 2. Validate  filename safety, extension allow-list
//!  ├─ 3. Decode    strict base64, 10 MiB decoded-size ceiling
//!  ├─ 4. Spool     scoped temp file, original extension, deleted on drop
//!  ├─ 5. Convert   external command, or fallback extraction
//!  └─ 6. Respond   {success, markdown, fileName} + security headers
//! ```
//!
//! A failed conversion is still a 200: the response carries a document
//! explaining the failure. HTTP errors are reserved for requests that
//! could not be processed at all.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2md_gateway::{serve, GatewayConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::default();
//!     serve(config, "0.0.0.0:8080".parse()?).await?;
//!     Ok(())
//! }
//! ```
//!
//! Or drive the pipeline without a socket:
//!
//! ```rust,no_run
//! use doc2md_gateway::{Gateway, GatewayConfig, GatewayRequest};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let gateway = Gateway::new(GatewayConfig::default()).await;
//! let response = gateway
//!     .handle(GatewayRequest::post(
//!         r#"{"fileData":"aGVsbG8=","fileName":"hello.txt"}"#,
//!     ))
//!     .await;
//! println!("{} {}", response.status, response.body);
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc2md-gateway` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod handler;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{GatewayConfig, GatewayConfigBuilder, DEFAULT_CONVERTER_COMMAND, DEFAULT_MAX_DECODED_BYTES};
pub use error::GatewayError;
pub use handler::Gateway;
pub use pipeline::convert::{
    ConversionFailure, DocumentConverter, ExternalConverter, FallbackConverter,
};
pub use request::{GatewayRequest, UploadRequest};
pub use response::GatewayResponse;
pub use server::{build_router, serve};

//! Pipeline stages for upload-to-Markdown conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. a different converter backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! request ──▶ validate ──▶ decode ──▶ spool ──▶ convert
//! (JSON)     (name/ext)   (base64)  (tempfile)  (markdown)
//! ```
//!
//! 1. [`validate`] — filename safety and the extension allow-list; pure
//!    string checks that run before anything touches the filesystem
//! 2. [`decode`]   — strict base64 decode plus the decoded-size ceiling
//! 3. [`spool`]    — write bytes to a scoped temp file that deletes itself
//!    on drop, preserving the original extension for format sniffing
//! 4. [`convert`]  — the converter capability: external command or
//!    fallback extraction, selected once at startup

pub mod convert;
pub mod decode;
pub mod spool;
pub mod validate;

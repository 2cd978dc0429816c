//! Scoped temp file: decoded bytes spooled to disk for the converter.
//!
//! ## Why a file at all?
//!
//! External converters take a filesystem path — they cannot read from a
//! byte buffer — and most of them sniff the format from the extension.
//! [`SpooledFile`] writes the bytes under a collision-resistant random name
//! that keeps the upload's extension, and ties deletion to ownership: when
//! the handle drops, the file is gone. That single mechanism covers the
//! success path, the conversion-failure path, and panics alike, which is
//! what the temp-cleanup invariant requires.

use crate::error::GatewayError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// An exclusively owned temporary file, deleted on drop.
#[derive(Debug)]
pub struct SpooledFile {
    file: NamedTempFile,
}

impl SpooledFile {
    /// Write `bytes` to a fresh temp file whose name ends in `.{extension}`.
    pub fn write(bytes: &[u8], extension: &str) -> Result<Self, GatewayError> {
        let mut file = tempfile::Builder::new()
            .prefix("doc2md-")
            .suffix(&format!(".{extension}"))
            .tempfile()
            .map_err(|e| GatewayError::Internal(format!("temp file create: {e}")))?;

        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| GatewayError::Internal(format!("temp file write: {e}")))?;

        debug!(path = %file.path().display(), size = bytes.len(), "spooled upload");
        Ok(Self { file })
    }

    /// Path handed to the converter. Valid until `self` drops.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_extension_and_content() {
        let spool = SpooledFile::write(b"hello", "txt").unwrap();
        assert_eq!(
            spool.path().extension().and_then(|e| e.to_str()),
            Some("txt")
        );
        assert_eq!(std::fs::read(spool.path()).unwrap(), b"hello");
    }

    #[test]
    fn deleted_on_drop() {
        let path = {
            let spool = SpooledFile::write(b"transient", "md").unwrap();
            spool.path().to_path_buf()
        };
        assert!(!path.exists(), "temp file survived drop: {}", path.display());
    }

    #[test]
    fn two_spools_never_collide() {
        let a = SpooledFile::write(b"a", "pdf").unwrap();
        let b = SpooledFile::write(b"b", "pdf").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn empty_content_is_fine() {
        let spool = SpooledFile::write(b"", "doc").unwrap();
        assert_eq!(std::fs::metadata(spool.path()).unwrap().len(), 0);
    }
}

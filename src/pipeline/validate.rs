//! Input validation: filename safety and the extension allow-list.
//!
//! The filename is attacker-controlled and, via the temp-file suffix, ends
//! up influencing a path on local disk. Validation is therefore a reject
//! list of path metacharacters plus `..`, checked *before* anything touches
//! the filesystem — every rejection here short-circuits the pipeline while
//! it is still pure string handling.

use crate::error::GatewayError;

/// Extensions the gateway accepts, lowercase, without the dot.
pub const ALLOWED_EXTENSIONS: [&str; 9] = [
    "docx", "doc", "xlsx", "xls", "pptx", "ppt", "pdf", "txt", "md",
];

/// Characters that must never appear in an uploaded filename.
///
/// Union of path separators, the Windows-reserved set, and the shell-glob
/// characters; `..` is checked as a substring separately.
const FORBIDDEN_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

const MAX_NAME_CHARS: usize = 255;

/// Reject empty, over-long, or metacharacter-bearing filenames.
pub fn validate_file_name(name: &str) -> Result<(), GatewayError> {
    if name.is_empty()
        || name.chars().count() > MAX_NAME_CHARS
        || name.contains("..")
        || name.contains(FORBIDDEN_CHARS)
    {
        return Err(GatewayError::InvalidFileName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Extract the lowercase extension and check it against the allow-list.
///
/// Returns the extension without the leading dot, ready to be used as a
/// temp-file suffix.
pub fn validate_extension(name: &str) -> Result<String, GatewayError> {
    let extension = name
        .rsplit_once('.')
        .map(|(stem, ext)| if stem.is_empty() { "" } else { ext })
        .unwrap_or("")
        .to_ascii_lowercase();

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(GatewayError::UnsupportedExtension { extension })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        for name in ["report.docx", "notes.md", "Q3 figures.xlsx", "日本語.pdf"] {
            assert!(validate_file_name(name).is_ok(), "rejected {name:?}");
        }
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for name in [
            "../../etc/passwd",
            "..",
            "a/b.txt",
            "a\\b.txt",
            "C:whatever.doc",
        ] {
            assert!(validate_file_name(name).is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn rejects_metacharacters() {
        for name in ["a*.txt", "a?.txt", "a\".txt", "a<b>.txt", "a|b.txt"] {
            assert!(validate_file_name(name).is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn rejects_empty_and_overlong() {
        assert!(validate_file_name("").is_err());
        let long = format!("{}.txt", "a".repeat(300));
        assert!(validate_file_name(&long).is_err());
        // exactly at the cap is fine
        let at_cap = format!("{}.txt", "a".repeat(MAX_NAME_CHARS - 4));
        assert!(validate_file_name(&at_cap).is_ok());
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(validate_extension("REPORT.DOCX").unwrap(), "docx");
        assert_eq!(validate_extension("a.Md").unwrap(), "md");
    }

    #[test]
    fn extension_allow_list_is_enforced() {
        for name in ["payload.exe", "script.sh", "archive.zip", "noext", ".hidden"] {
            let err = validate_extension(name).unwrap_err();
            assert!(matches!(err, GatewayError::UnsupportedExtension { .. }));
        }
    }

    #[test]
    fn last_extension_wins() {
        // double extensions route by the final suffix, like the temp file will
        assert_eq!(validate_extension("a.tar.md").unwrap(), "md");
        assert!(validate_extension("a.md.exe").is_err());
    }
}

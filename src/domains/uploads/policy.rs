//! Extension policy for uploads.
//!
//! Decides which files are accepted and whether their payload is stored as
//! text or as a binary blob.

use std::path::Path;

use crate::core::config::UploadsConfig;

/// How an accepted upload's payload is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Decoded as UTF-8 text.
    Text,

    /// Stored as raw bytes.
    Binary,
}

/// Allow-list and text/binary split for uploaded files.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_extensions: Vec<String>,
    text_extensions: Vec<String>,
}

impl UploadPolicy {
    /// Create a policy from lists of extensions (with leading dot).
    pub fn new(
        allowed_extensions: impl IntoIterator<Item = impl Into<String>>,
        text_extensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let normalize = |ext: String| ext.to_lowercase();
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| normalize(e.into()))
                .collect(),
            text_extensions: text_extensions
                .into_iter()
                .map(|e| normalize(e.into()))
                .collect(),
        }
    }

    /// Build the policy from the uploads configuration.
    pub fn from_config(config: &UploadsConfig) -> Self {
        Self::new(
            config.allowed_extensions.iter().cloned(),
            config.text_extensions.iter().cloned(),
        )
    }

    /// Whether the extension is on the allow-list.
    pub fn is_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }

    /// Storage kind for an (allowed) extension.
    pub fn content_kind(&self, extension: &str) -> ContentKind {
        if self.text_extensions.iter().any(|e| e == extension) {
            ContentKind::Text
        } else {
            ContentKind::Binary
        }
    }
}

/// Lowercased extension of a filename including the leading dot.
///
/// Returns an empty string when the name has no extension; dotfiles such as
/// `.bashrc` have none.
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Display title of an uploaded file: its name without the extension.
pub fn title_of(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

/// MIME type reported for an extension.
pub fn mime_type_for(extension: &str) -> &'static str {
    match extension {
        ".txt" => "text/plain",
        ".md" => "text/markdown",
        ".pdf" => "application/pdf",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("notes.txt"), ".txt");
        assert_eq!(extension_of("README.MD"), ".md");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".bashrc"), "");
    }

    #[test]
    fn test_title_of() {
        assert_eq!(title_of("notes.txt"), "notes");
        assert_eq!(title_of("archive.tar.gz"), "archive.tar");
        assert_eq!(title_of("Makefile"), "Makefile");
    }

    #[test]
    fn test_default_policy() {
        let policy = UploadPolicy::from_config(&UploadsConfig::default());
        assert!(policy.is_allowed(".txt"));
        assert!(policy.is_allowed(".md"));
        assert!(!policy.is_allowed(".pdf"));
        assert!(!policy.is_allowed(".exe"));
        assert!(!policy.is_allowed(""));
        assert_eq!(policy.content_kind(".md"), ContentKind::Text);
    }

    #[test]
    fn test_binary_kind_for_non_text_extension() {
        let policy = UploadPolicy::new([".txt", ".PNG"], [".txt"]);
        assert!(policy.is_allowed(".png"));
        assert_eq!(policy.content_kind(".png"), ContentKind::Binary);
        assert_eq!(policy.content_kind(".txt"), ContentKind::Text);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_for(".txt"), "text/plain");
        assert_eq!(mime_type_for(".md"), "text/markdown");
        assert_eq!(mime_type_for(".bin"), "application/octet-stream");
    }
}

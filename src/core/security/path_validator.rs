use std::path::{Component, Path, PathBuf};

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Filename is empty")]
    EmptyFilename,

    #[error("Filename '{name}' is not a plain file name")]
    NotAPlainName { name: String },
}

/// Resolves the on-disk location of an uploaded file.
///
/// The filename supplied by the client must be exactly one normal path
/// component: no separators, no `.`/`..`, no root or drive prefix. The
/// resulting path is always a direct child of `upload_dir`.
///
/// Two uploads with the same filename resolve to the same path, so the
/// later write replaces the earlier file.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use local_doc_server::core::upload_path;
///
/// let path = upload_path(Path::new("uploads"), "notes.txt").unwrap();
/// assert_eq!(path, Path::new("uploads/notes.txt"));
/// assert!(upload_path(Path::new("uploads"), "../notes.txt").is_err());
/// ```
pub fn upload_path(upload_dir: &Path, filename: &str) -> Result<PathBuf, PathSecurityError> {
    if filename.trim().is_empty() {
        return Err(PathSecurityError::EmptyFilename);
    }

    // Backslashes are separators on Windows clients; treat them as such
    // everywhere so the name cannot smuggle in a directory.
    if filename.contains('\\') {
        return Err(not_a_plain_name(filename));
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == filename => {
            Ok(upload_dir.join(name))
        }
        _ => Err(not_a_plain_name(filename)),
    }
}

fn not_a_plain_name(filename: &str) -> PathSecurityError {
    PathSecurityError::NotAPlainName {
        name: filename.to_string(),
    }
}

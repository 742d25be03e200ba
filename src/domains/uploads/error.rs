//! Upload-specific error types.

use thiserror::Error;

use crate::core::security::PathSecurityError;
use crate::domains::resources::ResourceError;

/// Rejections of an upload request before anything is written.
///
/// The display text is what the client receives in the `error` field.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The form has no `file` part, or the part carries no filename.
    #[error("no file")]
    NoFile,

    /// The `description` field is absent or blank.
    #[error("missing description")]
    MissingDescription,

    /// The filename would not stay inside the upload directory.
    #[error("invalid filename")]
    InvalidFilename(#[source] PathSecurityError),

    /// The file extension is not on the allow-list.
    #[error("disallowed extension")]
    DisallowedExtension {
        /// Lowercased extension including the dot, empty when there is none.
        extension: String,
    },
}

/// Errors that can occur while accepting an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request was rejected by validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A text upload was not valid UTF-8.
    #[error("Decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Creating the upload directory or writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The registry refused the new resource.
    #[error("Registration error: {0}")]
    Registration(#[from] ResourceError),
}

impl UploadError {
    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

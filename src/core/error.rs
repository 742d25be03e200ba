//! Error types and handling for the document server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

/// A specialized Result type for document server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the document server.
///
/// This enum captures the errors an HTTP request handler can produce; its
/// `IntoResponse` impl in the HTTP transport maps them to status codes.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the uploads domain.
    #[error("Upload error: {0}")]
    Upload(#[from] crate::domains::uploads::UploadError),

    /// The request body could not be decoded as a multipart form.
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// The request was not a multipart form at all.
    #[error("Multipart rejection: {0}")]
    MultipartRejection(#[from] axum::extract::multipart::MultipartRejection),
}

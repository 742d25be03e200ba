//! Uploads domain module.
//!
//! Accepts files submitted to `POST /upload` and registers them as
//! resources.
//!
//! ## Architecture
//!
//! - `policy.rs` - Extension allow-list, text/binary selection, MIME types
//! - `service.rs` - The validate, store and register workflow
//! - `error.rs` - Validation and upload error types

mod error;
mod policy;
mod service;

pub use error::{UploadError, ValidationError};
pub use policy::{ContentKind, UploadPolicy, extension_of, mime_type_for, title_of};
pub use service::{UploadForm, UploadReceipt, UploadService, UploadedFile};

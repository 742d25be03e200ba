// Security module for upload path validation
//
// This module keeps client-supplied filenames from escaping the configured
// upload directory.

pub mod path_validator;

pub use path_validator::{PathSecurityError, upload_path};

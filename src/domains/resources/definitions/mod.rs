//! Resource definitions module.
//!
//! Each startup resource is defined in its own file with:
//! - URI and metadata
//! - Content provider
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod compliance;

pub use compliance::ComplianceDocumentResource;

use super::service::ResourceContent;

/// Trait for resource definitions.
///
/// Each startup resource must implement this trait to provide its metadata
/// and content.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The name of the resource.
    const NAME: &'static str;

    /// The display title of the resource.
    const TITLE: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}

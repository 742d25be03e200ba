//! Resources domain module.
//!
//! This module handles the document registry. Resources are documents that
//! MCP clients can list and read: the startup compliance document plus every
//! accepted upload.
//!
//! ## Architecture
//!
//! - `definitions/` - Startup resource definitions (one file per resource)
//! - `registry.rs` - Central registration of startup resources and templates
//! - `service.rs` - The registry store used for listing, reading and uploads

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{UPLOADED_DOCUMENT_PREFIX, get_all_resources};
pub use service::{ResourceContent, ResourceEntry, ResourceService};

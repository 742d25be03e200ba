//! Resource Registry - central registration of startup resources.
//!
//! Resources listed here exist from process start, before any upload.
//! When adding a new startup resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResourceTemplate, ResourceTemplate};

use super::definitions::{ComplianceDocumentResource, ResourceDefinition};
use super::service::ResourceEntry;

/// URI scheme prefix of uploaded documents; the id follows the third slash.
pub const UPLOADED_DOCUMENT_PREFIX: &str = "doc:///";

/// Helper function to create a resource entry from a definition.
fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    ResourceEntry::new(R::URI, R::NAME, R::content())
        .with_title(R::TITLE)
        .with_description(R::DESCRIPTION)
        .with_mime_type(R::MIME_TYPE)
}

/// Get all startup resources as ResourceEntries.
///
/// This is the central place where all startup resources are registered.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![build_resource::<ComplianceDocumentResource>()]
}

/// Get all registered resource templates.
///
/// Resource templates use URI templates (RFC 6570) to describe
/// parameterized resources that clients can fill in.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: format!("{UPLOADED_DOCUMENT_PREFIX}{{id}}"),
            name: "Uploaded Documents".to_string(),
            title: Some("Uploaded Document".to_string()),
            description: Some(
                "Documents uploaded through POST /upload, addressed by their generated id"
                    .to_string(),
            ),
            mime_type: None,
        }
        .no_annotation(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), 1);

        let entry = &resources[0];
        assert_eq!(entry.uri(), "doc://compliance-1");
        assert_eq!(entry.resource.raw.title.as_deref(), Some("compliance-1"));
        assert_eq!(entry.resource.raw.mime_type.as_deref(), Some("text/markdown"));
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "doc:///{id}");
    }
}

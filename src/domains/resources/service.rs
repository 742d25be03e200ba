//! Resource service implementation.
//!
//! The ResourceService is the document registry. It maps resource URIs to
//! their metadata and content, hands out listings in registration order and
//! serves read requests. It is created once by the server and shared by
//! reference with the upload workflow and the MCP handler.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rmcp::model::{
    AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents, ResourceTemplate,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};

/// Service for managing and accessing resources.
///
/// Registration is append-only: entries are never updated or removed once
/// registered, and a URI can only be registered once.
pub struct ResourceService {
    /// Registered resources, guarded for concurrent uploads and reads.
    state: RwLock<RegistryState>,

    /// Resource templates for parameterized resources.
    templates: Vec<ResourceTemplate>,
}

/// Registered entries plus the order they were registered in.
#[derive(Debug, Default)]
struct RegistryState {
    /// Key: resource URI, Value: resource entry
    entries: HashMap<String, ResourceEntry>,

    /// URIs in registration order, used for stable listings.
    order: Vec<String>,
}

impl RegistryState {
    fn insert(&mut self, entry: ResourceEntry) -> Result<(), ResourceError> {
        let uri = entry.uri().to_string();
        if self.entries.contains_key(&uri) {
            return Err(ResourceError::already_registered(uri));
        }
        self.order.push(uri.clone());
        self.entries.insert(uri, entry);
        Ok(())
    }
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content of this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceContent {
    /// Text content, served as-is.
    Text(String),

    /// Binary content, served base64 encoded.
    Binary(Vec<u8>),
}

impl ResourceContent {
    /// Size of the payload in bytes.
    fn size(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary(data) => data.len(),
        }
    }
}

impl ResourceEntry {
    /// Create an entry with the given identity and content.
    ///
    /// The size field of the metadata is derived from the content.
    pub fn new(uri: impl Into<String>, name: impl Into<String>, content: ResourceContent) -> Self {
        let mut raw = RawResource::new(uri, name);
        raw.size = u32::try_from(content.size()).ok();

        Self {
            resource: raw.no_annotation(),
            content,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.resource.raw.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.resource.raw.description = Some(description.into());
        self
    }

    /// Set the MIME type of the content.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.resource.raw.mime_type = Some(mime_type.into());
        self
    }

    /// The URI this entry is registered under.
    pub fn uri(&self) -> &str {
        &self.resource.raw.uri
    }
}

impl ResourceService {
    /// Create a new ResourceService holding the startup resources.
    pub fn new() -> Self {
        info!("Initializing ResourceService");

        let mut state = RegistryState::default();
        Self::register_from_registry(&mut state);

        Self {
            state: RwLock::new(state),
            templates: get_all_resource_templates(),
        }
    }

    /// Register all startup resources from the registry.
    ///
    /// A startup resource that cannot be registered is logged and skipped;
    /// it never prevents the server from starting.
    fn register_from_registry(state: &mut RegistryState) {
        info!("Registering resources from registry");
        for entry in get_all_resources() {
            let uri = entry.uri().to_string();
            match state.insert(entry) {
                Ok(()) => info!("Registered startup resource: {}", uri),
                Err(e) => warn!("Skipping startup resource {}: {}", uri, e),
            }
        }
    }

    /// Register a resource.
    pub async fn register_resource(&self, entry: ResourceEntry) -> Result<(), ResourceError> {
        let uri = entry.uri().to_string();
        self.state.write().await.insert(entry)?;
        info!("Registered resource: {}", uri);
        Ok(())
    }

    /// List all available resources in registration order.
    pub async fn list_resources(&self) -> Vec<Resource> {
        let state = self.state.read().await;
        state
            .order
            .iter()
            .filter_map(|uri| state.entries.get(uri))
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Check whether a URI is registered.
    pub async fn contains(&self, uri: &str) -> bool {
        self.state.read().await.entries.contains_key(uri)
    }

    /// Number of registered resources.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let state = self.state.read().await;
        let entry = state
            .entries
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let content = match &entry.content {
            ResourceContent::Text(text) => ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text: text.clone(),
                meta: None,
            },
            ResourceContent::Binary(data) => ResourceContents::BlobResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                blob: STANDARD.encode(data),
                meta: None,
            },
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }
}

impl Default for ResourceService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resources::definitions::{ComplianceDocumentResource, ResourceDefinition};

    fn text_entry(uri: &str, text: &str) -> ResourceEntry {
        ResourceEntry::new(uri, "notes.txt", ResourceContent::Text(text.to_string()))
            .with_title("notes")
            .with_description("meeting notes")
            .with_mime_type("text/plain")
    }

    #[tokio::test]
    async fn test_compliance_document_present_at_startup() {
        let service = ResourceService::new();

        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].raw.uri, ComplianceDocumentResource::URI);
        assert_eq!(resources[0].raw.uri, "doc://compliance-1");
    }

    #[test]
    fn test_startup_duplicate_is_skipped() {
        let mut state = RegistryState::default();
        ResourceService::register_from_registry(&mut state);
        ResourceService::register_from_registry(&mut state);

        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.order, vec!["doc://compliance-1".to_string()]);
    }

    #[tokio::test]
    async fn test_register_and_read_text() {
        let service = ResourceService::new();
        service
            .register_resource(text_entry("doc:///abc", "hello"))
            .await
            .unwrap();

        let result = service.read_resource("doc:///abc").await.unwrap();
        assert_eq!(result.contents.len(), 1);
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, uri, .. } => {
                assert_eq!(text, "hello");
                assert_eq!(uri, "doc:///abc");
            }
            other => panic!("Expected text contents, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_binary_content_is_base64_encoded() {
        let service = ResourceService::new();
        let bytes = vec![0u8, 159, 146, 150];
        service
            .register_resource(
                ResourceEntry::new("doc:///bin", "logo.png", ResourceContent::Binary(bytes.clone()))
                    .with_mime_type("image/png"),
            )
            .await
            .unwrap();

        let result = service.read_resource("doc:///bin").await.unwrap();
        match &result.contents[0] {
            ResourceContents::BlobResourceContents {
                blob, mime_type, ..
            } => {
                assert_eq!(STANDARD.decode(blob).unwrap(), bytes);
                assert_eq!(mime_type.as_deref(), Some("image/png"));
            }
            other => panic!("Expected blob contents, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_uri_is_rejected() {
        let service = ResourceService::new();
        service
            .register_resource(text_entry("doc:///dup", "first"))
            .await
            .unwrap();

        let err = service
            .register_resource(text_entry("doc:///dup", "second"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::AlreadyRegistered(_)));

        // The original registration is untouched.
        let result = service.read_resource("doc:///dup").await.unwrap();
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => assert_eq!(text, "first"),
            other => panic!("Expected text contents, got {:?}", other),
        }
        assert_eq!(service.len().await, 2);
    }

    #[tokio::test]
    async fn test_listing_order_is_stable() {
        let service = ResourceService::new();
        for i in 0..5 {
            service
                .register_resource(text_entry(&format!("doc:///{i}"), "x"))
                .await
                .unwrap();
        }

        let first: Vec<_> = service
            .list_resources()
            .await
            .into_iter()
            .map(|r| r.raw.uri)
            .collect();
        let second: Vec<_> = service
            .list_resources()
            .await
            .into_iter()
            .map(|r| r.raw.uri)
            .collect();

        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "doc://compliance-1",
                "doc:///0",
                "doc:///1",
                "doc:///2",
                "doc:///3",
                "doc:///4"
            ]
        );
    }

    #[tokio::test]
    async fn test_listing_carries_metadata_without_content() {
        let service = ResourceService::new();
        service
            .register_resource(text_entry("doc:///meta", "hello"))
            .await
            .unwrap();

        let resources = service.list_resources().await;
        let listed = resources
            .iter()
            .find(|r| r.raw.uri == "doc:///meta")
            .unwrap();
        assert_eq!(listed.raw.name, "notes.txt");
        assert_eq!(listed.raw.title.as_deref(), Some("notes"));
        assert_eq!(listed.raw.description.as_deref(), Some("meeting notes"));
        assert_eq!(listed.raw.size, Some(5));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = ResourceService::new();

        let result = service.read_resource("doc:///nonexistent").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_templates_advertise_uploaded_documents() {
        let service = ResourceService::new();
        let templates = service.list_resource_templates().await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "doc:///{id}");
    }
}

//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the resource registry. The same registry is
//! handed to the upload service, so documents accepted over HTTP become
//! visible to MCP clients immediately.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{resources::ResourceService, uploads::UploadService};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap and every clone shares the same registry, which lets the transport
/// hand one instance to each client session.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The document registry.
    resource_service: Arc<ResourceService>,

    /// Service accepting uploads into the registry.
    upload_service: Arc<UploadService>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        Self::with_resources(config, Arc::new(ResourceService::new()))
    }

    /// Create a server around an existing registry.
    pub fn with_resources(config: Config, resource_service: Arc<ResourceService>) -> Self {
        let config = Arc::new(config);
        let upload_service = Arc::new(UploadService::new(
            &config.uploads,
            resource_service.clone(),
        ));

        Self {
            config,
            resource_service,
            upload_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The document registry.
    pub fn resources(&self) -> &Arc<ResourceService> {
        &self.resource_service
    }

    /// The upload workflow.
    pub fn uploads(&self) -> &Arc<UploadService> {
        &self.upload_service
    }

    /// Summaries of all registered resources (for the plain HTTP listing).
    pub async fn resource_summaries(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.raw.uri,
                    "name": r.raw.name,
                    "title": r.raw.title,
                    "description": r.raw.description,
                    "mimeType": r.raw.mime_type,
                    "size": r.raw.size
                })
            })
            .collect()
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Local document registry. List resources to discover uploaded documents and \
                 read them by URI. Documents are added through POST /upload."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_resources().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| {
                McpError::resource_not_found(
                    e.to_string(),
                    Some(serde_json::json!({ "uri": request.uri })),
                )
            })
    }
}

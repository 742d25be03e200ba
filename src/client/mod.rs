//! MCP client used by the `list_resources` and `read_resource` binaries.
//!
//! Each binary opens one connection, issues its requests, prints the results
//! and closes the connection. There is no retry.

mod render;

pub use render::{render_contents, render_index, render_listing};

use rmcp::{
    ServiceExt,
    model::{ReadResourceRequestParam, Resource, ResourceContents},
    service::{RoleClient, RunningService, ServiceError},
    transport::StreamableHttpClientTransport,
};
use thiserror::Error;
use tracing::{debug, info};

/// Server endpoint used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/mcp";

/// Errors raised by the document client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The MCP session could not be established.
    #[error("Failed to connect to {url}: {message}")]
    Connect { url: String, message: String },

    /// A request on an established session failed.
    #[error("Request failed: {0}")]
    Request(#[from] ServiceError),

    /// The session did not shut down cleanly.
    #[error("Failed to close connection: {0}")]
    Close(#[from] tokio::task::JoinError),
}

/// A connected MCP session against the document server.
pub struct DocClient {
    service: RunningService<RoleClient, ()>,
}

impl DocClient {
    /// Connect to the server's MCP endpoint and complete initialization.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        info!("Connecting to {}", url);
        let transport = StreamableHttpClientTransport::from_uri(url.to_string());
        let service = ().serve(transport).await.map_err(|e| ClientError::Connect {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if let Some(peer) = service.peer_info() {
            debug!("Connected to {}", peer.server_info.name);
        }

        Ok(Self { service })
    }

    /// List every registered resource.
    pub async fn list(&self) -> Result<Vec<Resource>, ClientError> {
        Ok(self.service.list_all_resources().await?)
    }

    /// Read the contents of one resource.
    pub async fn read(&self, uri: &str) -> Result<Vec<ResourceContents>, ClientError> {
        let result = self
            .service
            .read_resource(ReadResourceRequestParam {
                uri: uri.to_string(),
            })
            .await?;
        Ok(result.contents)
    }

    /// Close the session.
    pub async fn close(self) -> Result<(), ClientError> {
        self.service.cancel().await?;
        Ok(())
    }
}

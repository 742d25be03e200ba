//! Document Server Entry Point
//!
//! Initializes logging, loads configuration, and serves the MCP endpoint and
//! the upload route over HTTP.

use anyhow::Result;
use tracing::info;

use local_doc_server::core::{Config, HttpTransport, McpServer, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Create the MCP server; the compliance document is registered here
    let server = McpServer::new(config.clone());

    info!("Server initialized");

    HttpTransport::new(config.transport).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

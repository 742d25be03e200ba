//! Local Document Server Library
//!
//! An MCP server exposing uploaded local documents as resources, plus the
//! client used by the bundled command line tools.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, logging, the MCP server handler and the
//!   HTTP transport (MCP endpoint + upload route)
//! - **domains**: business logic organized by bounded contexts
//!   - **resources**: the document registry clients list and read
//!   - **uploads**: validation, storage and registration of uploaded files
//! - **client**: single-shot MCP client for listing and reading documents
//!
//! # Example
//!
//! ```rust,no_run
//! use local_doc_server::core::{Config, HttpTransport, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     HttpTransport::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};

//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the document
//! server, including error handling, configuration, server lifecycle
//! management, upload path safety and the HTTP transport.

pub mod config;
pub mod error;
pub mod logging;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use security::{PathSecurityError, upload_path};
pub use server::McpServer;
pub use transport::{HttpTransport, TransportConfig, build_router};

//! Transport layer for the document server.
//!
//! The server speaks MCP over streamable HTTP: clients POST JSON-RPC
//! messages and receive responses as Server-Sent Events. The same HTTP
//! listener also serves the upload route, so a single process hosts both
//! the registry's writers and its readers.

mod config;
mod error;
pub mod http;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use http::{HttpTransport, build_router};

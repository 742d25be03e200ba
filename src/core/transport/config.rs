//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// HTTP transport configuration.
///
/// A single listener hosts the MCP streamable HTTP endpoint (SSE responses)
/// next to the plain upload and health routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path the MCP endpoint is mounted at.
    #[serde(default = "default_mcp_path")]
    pub mcp_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_mcp_path() -> String {
    "/mcp".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: default_host(),
            mcp_path: default_mcp_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a transport config for the given port and host.
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self {
            port,
            host: host.into(),
            ..Default::default()
        }
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let mcp_path = std::env::var("MCP_HTTP_PATH")
            .map(|p| normalize_path(&p))
            .unwrap_or_else(|_| default_mcp_path());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Self {
            port,
            host,
            mcp_path,
            enable_cors,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        format!(
            "HTTP on {}:{} (MCP at {})",
            self.host, self.port, self.mcp_path
        )
    }
}

/// Ensure a route path starts with exactly one '/' and has no trailing '/'.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        default_mcp_path()
    } else {
        format!("/{trimmed}")
    }
}

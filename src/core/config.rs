//! Configuration management for the document server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the document server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upload workflow configuration.
    pub uploads: UploadsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the upload workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    /// Directory uploaded files are written to, relative to the working
    /// directory unless absolute.
    pub dir: PathBuf,

    /// Lowercase extensions (with the leading dot) accepted for upload.
    pub allowed_extensions: Vec<String>,

    /// Lowercase extensions whose payload is decoded as UTF-8 text.
    /// Every other accepted extension is stored as a binary blob.
    pub text_extensions: Vec<String>,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            allowed_extensions: vec![".txt".to_string(), ".md".to_string()],
            text_extensions: vec![".txt".to_string(), ".md".to_string()],
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "LocalDocServer".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            uploads: UploadsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_UPLOAD_DIR`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(dir) = std::env::var("MCP_UPLOAD_DIR") {
            config.uploads.dir = PathBuf::from(dir);
        }

        if let Ok(list) = std::env::var("MCP_UPLOAD_ALLOWED_EXTENSIONS") {
            config.uploads.allowed_extensions = parse_extension_list(&list);
            info!(
                "Upload allow-list set from environment: {:?}",
                config.uploads.allowed_extensions
            );
        }

        if let Ok(list) = std::env::var("MCP_UPLOAD_TEXT_EXTENSIONS") {
            config.uploads.text_extensions = parse_extension_list(&list);
        }

        if let Ok(max) = std::env::var("MCP_UPLOAD_MAX_BYTES") {
            match max.parse() {
                Ok(bytes) => config.uploads.max_upload_bytes = bytes,
                Err(_) => warn!(
                    "Ignoring invalid MCP_UPLOAD_MAX_BYTES value '{}', keeping {} bytes",
                    max, config.uploads.max_upload_bytes
                ),
            }
        }

        config
    }
}

/// Parse a comma separated extension list such as `"txt, .MD,.pdf"`.
///
/// Entries are trimmed, lowercased and given a leading dot; empty entries
/// are dropped.
pub fn parse_extension_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty() && ext != ".")
        .map(|ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            }
        })
        .collect()
}

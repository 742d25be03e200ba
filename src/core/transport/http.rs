//! HTTP transport implementation.
//!
//! One axum router serves everything:
//! - the MCP streamable HTTP endpoint (JSON-RPC requests, SSE responses)
//! - `POST /upload` for multipart document uploads
//! - `GET /resources`, `GET /health` and `GET /` for plain HTTP clients

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};

use super::{TransportConfig, TransportError, TransportResult};
use crate::core::{Error, McpServer};
use crate::domains::uploads::{UploadError, UploadForm, UploadedFile};

/// HTTP transport handler.
pub struct HttpTransport {
    config: TransportConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until Ctrl-C is received.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        info!("Starting transport: {}", self.config.description());

        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → MCP:       {} (streamable HTTP / SSE)", self.config.mcp_path);
        info!("  → Upload:    POST /upload");
        info!("  → Resources: GET /resources");
        info!("  → Health:    GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the router serving the MCP endpoint and the plain HTTP routes.
pub fn build_router(server: McpServer, config: &TransportConfig) -> Router {
    let session_server = server.clone();
    let mcp_service = StreamableHttpService::new(
        move || Ok(session_server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let body_limit = server.config().uploads.max_upload_bytes;
    let state = AppState { server };

    let mut app = Router::new()
        .nest_service(&config.mcp_path, mcp_service)
        .route("/upload", post(handle_upload))
        .route("/resources", get(handle_resources))
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Add CORS if enabled
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "mcp": state.server.config().transport.mcp_path,
            "upload": "/upload",
            "resources": "/resources",
            "health": "/health"
        },
        "protocol": "MCP streamable HTTP (SSE)",
        "documentation": "POST multipart forms with 'file' and 'description' fields to /upload"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Plain JSON listing of all registered resources.
async fn handle_resources(State(state): State<AppState>) -> impl IntoResponse {
    let resources = state.server.resource_summaries().await;
    info!("Listing {} registered resources", resources.len());
    Json(serde_json::json!({
        "count": resources.len(),
        "resources": resources
    }))
}

/// Accept a multipart upload and register it as a resource.
#[instrument(skip_all)]
async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, Error> {
    let form = read_upload_form(multipart?).await?;
    let receipt = state.server.uploads().accept(form).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Collect the `file` and `description` fields of an upload form.
///
/// Unknown fields are ignored. A `file` field sent without a filename, or
/// with an empty one, is what a browser sends when no file was picked and
/// is ignored as well.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
                let Some(filename) = filename else {
                    continue;
                };
                let data = field.bytes().await?;
                form.file = Some(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            }
            Some("description") => {
                form.description = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Upload(UploadError::Validation(e)) => (StatusCode::BAD_REQUEST, e.to_string()),
            Error::Multipart(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                (StatusCode::PAYLOAD_TOO_LARGE, "file too large".to_string())
            }
            Error::Multipart(e) => (e.status(), "malformed multipart body".to_string()),
            Error::MultipartRejection(e) => (e.status(), "expected a multipart form".to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status, self);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

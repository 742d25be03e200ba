//! Print every resource registered on the document server as JSON.

use anyhow::Result;
use clap::Parser;

use local_doc_server::client::{DEFAULT_SERVER_URL, DocClient, render_listing};
use local_doc_server::core::init_logging;

#[derive(Debug, Parser)]
#[command(name = "list_resources")]
#[command(about = "List the resources registered on a document server", version)]
struct Cli {
    /// MCP endpoint of the server.
    #[arg(long, env = "MCP_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Log level for diagnostics on stderr.
    #[arg(long, env = "MCP_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let client = DocClient::connect(&cli.server).await?;
    let resources = client.list().await?;

    println!("{}", render_listing(&resources)?);

    client.close().await?;
    Ok(())
}

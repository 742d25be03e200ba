//! Print the content of resources registered on the document server.
//!
//! Without a URI argument every listed resource is read.

use anyhow::Result;
use clap::Parser;

use local_doc_server::client::{DEFAULT_SERVER_URL, DocClient, render_contents, render_index};
use local_doc_server::core::init_logging;

#[derive(Debug, Parser)]
#[command(name = "read_resource")]
#[command(about = "Read resources from a document server", version)]
struct Cli {
    /// URI of a single resource to read.
    uri: Option<String>,

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

    println!("{}", render_index(&resources));

    match cli.uri {
        Some(uri) => {
            let name = resources
                .iter()
                .find(|r| r.raw.uri == uri)
                .map(|r| r.raw.name.clone())
                .unwrap_or_else(|| uri.clone());
            let contents = client.read(&uri).await?;
            println!("\n{}", render_contents(&name, &contents));
        }
        None => {
            for resource in &resources {
                let contents = client.read(&resource.raw.uri).await?;
                println!("\n{}", render_contents(&resource.raw.name, &contents));
            }
        }
    }

    client.close().await?;
    Ok(())
}

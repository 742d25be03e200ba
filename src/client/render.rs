//! Plain-text rendering of listings and contents for standard output.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rmcp::model::{Resource, ResourceContents};

/// Pretty JSON array of the listed resources.
pub fn render_listing(resources: &[Resource]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(resources)
}

/// One `  - <name> (<uri>)` line per resource under a header.
pub fn render_index(resources: &[Resource]) -> String {
    let mut out = String::from("Available resources:");
    if resources.is_empty() {
        out.push_str("\nNo resources found");
        return out;
    }

    for resource in resources {
        out.push_str(&format!("\n  - {} ({})", resource.raw.name, resource.raw.uri));
    }
    out
}

/// Describe the first content item returned for a resource.
///
/// Text is printed as-is. Blobs are reported by size and shown as text when
/// the bytes happen to be UTF-8.
pub fn render_contents(name: &str, contents: &[ResourceContents]) -> String {
    let header = format!("--- Reading content of {name} ---");

    let body = match contents.first() {
        None => "No content returned".to_string(),
        Some(ResourceContents::TextResourceContents { text, .. }) => {
            format!("Text content:\n{text}")
        }
        Some(ResourceContents::BlobResourceContents { blob, .. }) => match STANDARD.decode(blob) {
            Ok(bytes) => {
                let size = format!("Binary content: {} bytes", bytes.len());
                match String::from_utf8(bytes) {
                    Ok(text) => format!("{size}\nDecoded text:\n{text}"),
                    Err(_) => format!("{size}\nBinary data (cannot decode as text)"),
                }
            }
            Err(_) => "Binary data (cannot decode as text)".to_string(),
        },
    };

    format!("{header}\n{body}")
}

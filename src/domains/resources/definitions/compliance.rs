//! Compliance document resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Document handling policy, available to every client from startup.
pub struct ComplianceDocumentResource;

impl ResourceDefinition for ComplianceDocumentResource {
    const URI: &'static str = "doc://compliance-1";
    const NAME: &'static str = "compliance-1.md";
    const TITLE: &'static str = "compliance-1";
    const DESCRIPTION: &'static str = "Document handling and upload compliance policy";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(POLICY.to_string())
    }
}

const POLICY: &str = r#"# Document Handling Policy

## Accepted uploads

- Only file types on the server allow-list are accepted (`.txt` and `.md` by default).
- Every upload must carry a non-empty description of its content.
- Filenames must be plain names; directory components are rejected.

## Storage

- Uploaded files are written to the server upload directory under their original name.
- Uploading a file with an existing name replaces the stored copy on disk.
- Each accepted upload is registered under its own `doc:///<id>` URI and stays
  readable for the lifetime of the server process.

## Restrictions

- Do not upload credentials, personal data or executable content.
- Registered documents cannot be modified or deleted through this server.
"#;

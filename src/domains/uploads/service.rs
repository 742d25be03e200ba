//! Upload service implementation.
//!
//! The UploadService turns a decoded upload form into a registered resource:
//! validate, store on disk, build the entry, register it. It knows nothing
//! about HTTP, so it can be driven directly in tests.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::error::{UploadError, ValidationError};
use super::policy::{ContentKind, UploadPolicy, extension_of, mime_type_for, title_of};
use crate::core::config::UploadsConfig;
use crate::core::security::upload_path;
use crate::domains::resources::{
    ResourceContent, ResourceEntry, ResourceService, UPLOADED_DOCUMENT_PREFIX,
};

/// A file part received in an upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client.
    pub filename: String,

    /// Full payload.
    pub data: Vec<u8>,
}

/// The fields of an upload form the service cares about.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// The `file` part, if present.
    pub file: Option<UploadedFile>,

    /// The `description` field, if present.
    pub description: Option<String>,
}

/// Successful upload response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub status: String,
    pub uri: String,
    pub size: usize,
    pub description: String,
    pub disk_path: String,
}

/// Upload after validation, ready to be stored.
struct ValidatedUpload {
    file: UploadedFile,
    description: String,
    extension: String,
    disk_path: PathBuf,
}

/// Service accepting uploads into the resource registry.
pub struct UploadService {
    /// Directory uploaded files are written to.
    upload_dir: PathBuf,

    /// Extension allow-list and text/binary split.
    policy: UploadPolicy,

    /// Registry new documents are added to.
    resources: Arc<ResourceService>,
}

impl UploadService {
    /// Create a new UploadService writing into the configured directory.
    pub fn new(config: &UploadsConfig, resources: Arc<ResourceService>) -> Self {
        info!(
            "Initializing UploadService (dir: {}, allowed: {:?})",
            config.dir.display(),
            config.allowed_extensions
        );

        Self {
            upload_dir: config.dir.clone(),
            policy: UploadPolicy::from_config(config),
            resources,
        }
    }

    /// Validate, store and register an upload.
    ///
    /// Nothing is written or registered when validation fails. Failures after
    /// validation are not rolled back: a file may stay on disk without a
    /// registry entry.
    #[instrument(skip_all)]
    pub async fn accept(&self, form: UploadForm) -> Result<UploadReceipt, UploadError> {
        let upload = self.validate(form)?;
        let filename = upload.file.filename.as_str();
        let size = upload.file.data.len();
        info!("Read {} bytes from {}", size, filename);

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        info!("Uploads directory: {}", self.upload_dir.display());

        info!("Attempting to save to: {}", upload.disk_path.display());
        tokio::fs::write(&upload.disk_path, &upload.file.data).await?;
        info!("Saved file to disk: {}", upload.disk_path.display());

        match tokio::fs::metadata(&upload.disk_path).await {
            Ok(meta) => info!(
                "File verified on disk: {} ({} bytes)",
                upload.disk_path.display(),
                meta.len()
            ),
            Err(e) => error!(
                "File was NOT created on disk: {} ({})",
                upload.disk_path.display(),
                e
            ),
        }

        let uri = format!("{}{}", UPLOADED_DOCUMENT_PREFIX, Uuid::new_v4());

        let content = match self.policy.content_kind(&upload.extension) {
            ContentKind::Text => ResourceContent::Text(String::from_utf8(upload.file.data)?),
            ContentKind::Binary => ResourceContent::Binary(upload.file.data),
        };

        let entry = ResourceEntry::new(&uri, filename, content)
            .with_title(title_of(filename))
            .with_description(&upload.description)
            .with_mime_type(mime_type_for(&upload.extension));

        self.resources.register_resource(entry).await?;
        info!("Registered resource: {} with URI {}", filename, uri);

        Ok(UploadReceipt {
            status: "success".to_string(),
            uri,
            size,
            description: upload.description,
            disk_path: upload.disk_path.display().to_string(),
        })
    }

    /// Check the form against the upload rules.
    fn validate(&self, form: UploadForm) -> Result<ValidatedUpload, ValidationError> {
        let Some(file) = form.file else {
            warn!("Rejected upload - no file provided");
            return Err(ValidationError::NoFile);
        };

        info!("Received upload request for file: {}", file.filename);

        let description = form
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        let Some(description) = description else {
            warn!("Rejected file {} - missing description", file.filename);
            return Err(ValidationError::MissingDescription);
        };

        let disk_path = upload_path(&self.upload_dir, &file.filename).map_err(|e| {
            warn!("Rejected file {} - {}", file.filename, e);
            ValidationError::InvalidFilename(e)
        })?;

        let extension = extension_of(&file.filename);
        if !self.policy.is_allowed(&extension) {
            warn!(
                "Rejected file {} - disallowed extension: {}",
                file.filename, extension
            );
            return Err(ValidationError::DisallowedExtension { extension });
        }

        Ok(ValidatedUpload {
            file,
            description,
            extension,
            disk_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use rmcp::model::ResourceContents;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        upload_dir: PathBuf,
        resources: Arc<ResourceService>,
        service: UploadService,
    }

    fn fixture_with(config: impl FnOnce(&mut UploadsConfig)) -> Fixture {
        let temp = TempDir::new().unwrap();
        let upload_dir = temp.path().join("uploads");
        let mut uploads = UploadsConfig {
            dir: upload_dir.clone(),
            ..Default::default()
        };
        config(&mut uploads);

        let resources = Arc::new(ResourceService::new());
        let service = UploadService::new(&uploads, resources.clone());
        Fixture {
            _temp: temp,
            upload_dir,
            resources,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(|_| {})
    }

    fn form(filename: &str, data: &[u8], description: Option<&str>) -> UploadForm {
        UploadForm {
            file: Some(UploadedFile {
                filename: filename.to_string(),
                data: data.to_vec(),
            }),
            description: description.map(str::to_string),
        }
    }

    async fn read_text(resources: &ResourceService, uri: &str) -> String {
        let result = resources.read_resource(uri).await.unwrap();
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text.clone(),
            other => panic!("Expected text contents, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_accept_notes_scenario() {
        let fx = fixture();

        let receipt = fx
            .service
            .accept(form("notes.txt", b"hello", Some("meeting notes")))
            .await
            .unwrap();

        assert_eq!(receipt.status, "success");
        assert_eq!(receipt.size, 5);
        assert_eq!(receipt.description, "meeting notes");
        assert!(receipt.uri.starts_with("doc:///"));
        assert_ne!(receipt.uri, "doc://compliance-1");
        assert_eq!(
            PathBuf::from(&receipt.disk_path),
            fx.upload_dir.join("notes.txt")
        );

        let listed = fx.resources.list_resources().await;
        let entry = listed.iter().find(|r| r.raw.uri == receipt.uri).unwrap();
        assert_eq!(entry.raw.name, "notes.txt");
        assert_eq!(entry.raw.title.as_deref(), Some("notes"));
        assert_eq!(entry.raw.description.as_deref(), Some("meeting notes"));
        assert_eq!(entry.raw.mime_type.as_deref(), Some("text/plain"));

        assert_eq!(read_text(&fx.resources, &receipt.uri).await, "hello");
        assert_eq!(
            std::fs::read(fx.upload_dir.join("notes.txt")).unwrap(),
            b"hello"
        );
    }

    #[tokio::test]
    async fn test_text_round_trip_preserves_content() {
        let fx = fixture();
        let text = "# Título\n\nLine with tabs\tand unicode ✓\r\n";

        let receipt = fx
            .service
            .accept(form("Readme.MD", text.as_bytes(), Some("docs")))
            .await
            .unwrap();

        assert_eq!(receipt.size, text.len());
        assert_eq!(read_text(&fx.resources, &receipt.uri).await, text);
    }

    #[tokio::test]
    async fn test_description_is_trimmed() {
        let fx = fixture();
        let receipt = fx
            .service
            .accept(form("a.txt", b"x", Some("  spaced out \n")))
            .await
            .unwrap();
        assert_eq!(receipt.description, "spaced out");
    }

    #[tokio::test]
    async fn test_missing_file_rejected_without_side_effects() {
        let fx = fixture();
        let err = fx
            .service
            .accept(UploadForm {
                file: None,
                description: Some("something".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::Validation(ValidationError::NoFile)
        ));
        assert_eq!(fx.resources.len().await, 1);
        assert!(!fx.upload_dir.exists());
    }

    #[tokio::test]
    async fn test_blank_description_rejected_without_side_effects() {
        for description in [None, Some(""), Some("   \t ")] {
            let fx = fixture();
            let err = fx
                .service
                .accept(form("notes.txt", b"hello", description))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                UploadError::Validation(ValidationError::MissingDescription)
            ));
            assert_eq!(fx.resources.len().await, 1);
            assert!(!fx.upload_dir.exists());
        }
    }

    #[tokio::test]
    async fn test_disallowed_extension_rejected_without_side_effects() {
        for filename in ["tool.exe", "image.png", "Makefile", "notes.txt.sh"] {
            let fx = fixture();
            let err = fx
                .service
                .accept(form(filename, b"data", Some("desc")))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                UploadError::Validation(ValidationError::DisallowedExtension { .. })
            ));
            assert_eq!(fx.resources.len().await, 1);
            assert!(!fx.upload_dir.exists());
        }
    }

    #[tokio::test]
    async fn test_extension_match_is_case_insensitive() {
        let fx = fixture();
        assert!(
            fx.service
                .accept(form("SHOUT.TXT", b"hi", Some("caps")))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_traversal_filename_rejected() {
        let fx = fixture();
        let err = fx
            .service
            .accept(form("../escape.txt", b"nope", Some("desc")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::Validation(ValidationError::InvalidFilename(_))
        ));
        assert!(!fx.upload_dir.exists());
        assert!(!fx.upload_dir.parent().unwrap().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_same_filename_gets_distinct_uris_and_overwrites_disk() {
        let fx = fixture();

        let first = fx
            .service
            .accept(form("notes.txt", b"first version", Some("v1")))
            .await
            .unwrap();
        let second = fx
            .service
            .accept(form("notes.txt", b"second", Some("v2")))
            .await
            .unwrap();

        assert_ne!(first.uri, second.uri);
        assert_eq!(first.disk_path, second.disk_path);

        // Both registry entries stay readable with their own content...
        assert_eq!(read_text(&fx.resources, &first.uri).await, "first version");
        assert_eq!(read_text(&fx.resources, &second.uri).await, "second");

        // ...while the disk only holds the latest write.
        assert_eq!(
            std::fs::read(fx.upload_dir.join("notes.txt")).unwrap(),
            b"second"
        );
        assert_eq!(fx.resources.len().await, 3);
    }

    #[tokio::test]
    async fn test_invalid_utf8_text_is_not_registered() {
        let fx = fixture();
        let err = fx
            .service
            .accept(form("broken.txt", &[0x68, 0xff, 0xfe], Some("bad bytes")))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Decode(_)));
        assert!(!err.is_client_error());
        assert_eq!(fx.resources.len().await, 1);
    }

    #[tokio::test]
    async fn test_binary_extension_stored_as_blob() {
        let fx = fixture_with(|uploads| uploads.allowed_extensions.push(".png".to_string()));
        let bytes = [0x89u8, b'P', b'N', b'G', 0x00, 0xff];

        let receipt = fx
            .service
            .accept(form("logo.png", &bytes, Some("company logo")))
            .await
            .unwrap();
        assert_eq!(receipt.size, bytes.len());

        let result = fx.resources.read_resource(&receipt.uri).await.unwrap();
        match &result.contents[0] {
            ResourceContents::BlobResourceContents {
                blob, mime_type, ..
            } => {
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(blob)
                    .unwrap();
                assert_eq!(decoded, bytes);
                assert_eq!(mime_type.as_deref(), Some("image/png"));
            }
            other => panic!("Expected blob contents, got {:?}", other),
        }
    }
}

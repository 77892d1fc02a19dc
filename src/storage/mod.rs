//! Object storage for registration screenshots.
//!
//! Every stored object is addressed by the public URL returned from
//! [`AttachmentStore::upload`]; the same URL is later handed back to
//! [`AttachmentStore::delete`].

mod local;
mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::configuration::{StorageBackend, StorageSettings};
use crate::domain::UploadedFile;

pub use local::{LocalAttachmentStore, UploadsMount};
pub use s3::S3AttachmentStore;

#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Stores the file and returns the URL it can be fetched from.
    async fn upload(&self, file: &UploadedFile) -> Result<String, AttachmentError>;

    /// Removes the object behind `url`. Deleting an object that is already gone succeeds.
    async fn delete(&self, url: &str) -> Result<(), AttachmentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("failed to upload object: {0}")]
    Upload(String),
    #[error("failed to delete object: {0}")]
    Delete(String),
    #[error("`{0}` does not belong to this attachment store")]
    ForeignUrl(String),
    #[error("storage misconfigured: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub async fn build_attachment_store(
    settings: &StorageSettings,
) -> Result<Arc<dyn AttachmentStore>, AttachmentError> {
    match settings.backend {
        StorageBackend::S3 => Ok(Arc::new(S3AttachmentStore::from_settings(settings).await?)),
        StorageBackend::Local => Ok(Arc::new(LocalAttachmentStore::from_settings(settings).await?)),
    }
}

/// Builds a collision-free object key that keeps the original file name readable.
pub(crate) fn object_key(prefix: &str, file: &UploadedFile) -> String {
    let name: String = file
        .file_name
        .as_deref()
        .unwrap_or("attachment")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let prefix = prefix.trim_matches('/');
    let unique = format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple());

    if prefix.is_empty() {
        format!("{unique}-{name}")
    } else {
        format!("{prefix}/{unique}-{name}")
    }
}

/// Strips the public base URL, leaving the object key.
pub(crate) fn key_from_url<'a>(base_url: &str, url: &'a str) -> Result<&'a str, AttachmentError> {
    url.strip_prefix(base_url.trim_end_matches('/'))
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|key| !key.is_empty() && !key.split('/').any(|part| part == ".."))
        .ok_or_else(|| AttachmentError::ForeignUrl(url.to_string()))
}

pub(crate) fn public_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::configuration::{StorageBackend, StorageSettings};
use crate::domain::UploadedFile;

use super::{AttachmentError, AttachmentStore, key_from_url, object_key, public_url};

/// Screenshots written below a directory on the local disk.
#[derive(Clone, Debug)]
pub struct LocalAttachmentStore {
    directory: PathBuf,
    key_prefix: String,
    public_base_url: String,
}

impl LocalAttachmentStore {
    pub fn new(directory: PathBuf, key_prefix: String, public_base_url: String) -> Self {
        Self {
            directory,
            key_prefix,
            public_base_url,
        }
    }

    pub async fn from_settings(settings: &StorageSettings) -> Result<Self, AttachmentError> {
        let directory = settings.local_directory.clone().ok_or_else(|| {
            AttachmentError::Config("storage.local_directory is required for local".into())
        })?;
        fs::create_dir_all(&directory).await?;

        Ok(Self::new(
            directory,
            settings.key_prefix.clone(),
            settings.public_base_url.clone(),
        ))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(key)
    }
}

/// Where the HTTP server exposes files written by [`LocalAttachmentStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadsMount {
    /// Request path matching the path of `public_base_url`, e.g. `/uploads`.
    pub path: String,
    pub directory: PathBuf,
}

impl UploadsMount {
    /// `None` unless the local backend is selected; object stores serve their own URLs.
    pub fn from_settings(settings: &StorageSettings) -> Result<Option<Self>, AttachmentError> {
        if settings.backend != StorageBackend::Local {
            return Ok(None);
        }
        let directory = settings.local_directory.clone().ok_or_else(|| {
            AttachmentError::Config("storage.local_directory is required for local".into())
        })?;
        let uri: axum::http::Uri = settings.public_base_url.parse().map_err(|e| {
            AttachmentError::Config(format!("storage.public_base_url is not a URL: {e}"))
        })?;
        let path = uri.path().trim_end_matches('/');
        if path.is_empty() {
            return Err(AttachmentError::Config(
                "storage.public_base_url needs a path, e.g. http://host/uploads".into(),
            ));
        }

        Ok(Some(Self {
            path: path.to_string(),
            directory,
        }))
    }
}

#[async_trait]
impl AttachmentStore for LocalAttachmentStore {
    async fn upload(&self, file: &UploadedFile) -> Result<String, AttachmentError> {
        let key = object_key(&self.key_prefix, file);
        let path = self.path_for(&key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, &file.bytes).await?;

        Ok(public_url(&self.public_base_url, &key))
    }

    async fn delete(&self, url: &str) -> Result<(), AttachmentError> {
        let key = key_from_url(&self.public_base_url, url)?;

        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AttachmentError::Delete(e.to_string())),
        }
    }
}

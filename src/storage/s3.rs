use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{Client, error::DisplayErrorContext, primitives::ByteStream};

use crate::configuration::StorageSettings;
use crate::domain::UploadedFile;

use super::{AttachmentError, AttachmentStore, key_from_url, object_key, public_url};

/// Screenshots kept in an S3 (or S3-compatible) bucket.
#[derive(Clone, Debug)]
pub struct S3AttachmentStore {
    client: Client,
    bucket: String,
    key_prefix: String,
    public_base_url: String,
}

impl S3AttachmentStore {
    pub fn new(client: Client, bucket: String, key_prefix: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            key_prefix,
            public_base_url,
        }
    }

    /// Credentials come from the default AWS provider chain.
    pub async fn from_settings(settings: &StorageSettings) -> Result<Self, AttachmentError> {
        let bucket = settings
            .bucket
            .clone()
            .ok_or_else(|| AttachmentError::Config("storage.bucket is required for s3".into()))?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let shared_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self::new(
            Client::from_conf(builder.build()),
            bucket,
            settings.key_prefix.clone(),
            settings.public_base_url.clone(),
        ))
    }
}

#[async_trait]
impl AttachmentStore for S3AttachmentStore {
    #[tracing::instrument(name = "Uploading attachment to S3", skip(self, file), fields(bucket = %self.bucket))]
    async fn upload(&self, file: &UploadedFile) -> Result<String, AttachmentError> {
        let key = object_key(&self.key_prefix, file);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .set_content_type(file.content_type.clone())
            .body(ByteStream::from(file.bytes.clone()))
            .send()
            .await
            .map_err(|e| AttachmentError::Upload(DisplayErrorContext(&e).to_string()))?;

        Ok(public_url(&self.public_base_url, &key))
    }

    #[tracing::instrument(name = "Deleting attachment from S3", skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, url: &str) -> Result<(), AttachmentError> {
        let key = key_from_url(&self.public_base_url, url)?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AttachmentError::Delete(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}

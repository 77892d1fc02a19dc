use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    AttachmentSlot, Attachments, NewUserRegistration, RegistrationChanges, RegistrationSubmission,
};
use crate::entities::user_registrations;
use crate::repository::{RegistrationStore, StoreError};
use crate::storage::AttachmentStore;

use super::LifecycleError;

const NOT_FOUND: &str = "Application not found";
const CREATE_FAILED: &str = "Something went wrong while creating the registration";

/// Registrations and the screenshots they own.
///
/// Uploads, deletes and the record write are separate steps with no rollback.
/// An object whose owning write fails is logged as orphaned; a failed delete
/// of a superseded object is logged and skipped.
pub struct RegistrationLifecycle {
    store: Arc<dyn RegistrationStore>,
    attachments: Arc<dyn AttachmentStore>,
}

impl RegistrationLifecycle {
    pub fn new(store: Arc<dyn RegistrationStore>, attachments: Arc<dyn AttachmentStore>) -> Self {
        Self { store, attachments }
    }

    #[tracing::instrument(
        name = "Submitting user registration",
        skip(self, submission, files),
        fields(registration_email = ?submission.email)
    )]
    pub async fn submit(
        &self,
        submission: RegistrationSubmission,
        files: &Attachments,
    ) -> Result<user_registrations::Model, LifecycleError> {
        self.create(submission, files)
            .await
            .map_err(|e| e.generic(CREATE_FAILED))
    }

    async fn create(
        &self,
        submission: RegistrationSubmission,
        files: &Attachments,
    ) -> Result<user_registrations::Model, LifecycleError> {
        let mut registration =
            NewUserRegistration::parse(submission).map_err(LifecycleError::Validation)?;

        if self
            .store
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(LifecycleError::DuplicateEmail);
        }

        let mut uploaded = Vec::new();
        for slot in AttachmentSlot::ALL {
            let Some(file) = slot.select(files) else {
                continue;
            };
            let url = self.attachments.upload(file).await.inspect_err(|e| {
                if !uploaded.is_empty() {
                    tracing::warn!(error = %e, orphaned = ?uploaded, "Upload failed, earlier uploads are orphaned");
                }
            })?;
            match slot {
                AttachmentSlot::LinkedinScreenshot => {
                    registration.linkedin_post_screenshot_url = Some(url.clone())
                }
                AttachmentSlot::PaymentScreenshot => {
                    registration.payment_screenshot_url = Some(url.clone())
                }
            }
            uploaded.push(url);
        }

        match self.store.create(registration).await {
            Ok(record) => Ok(record),
            Err(e) => {
                if !uploaded.is_empty() {
                    tracing::warn!(error = %e, orphaned = ?uploaded, "Registration was not saved, uploads are orphaned");
                }
                match e {
                    StoreError::UniqueViolation => Err(LifecycleError::DuplicateEmail),
                    other => Err(other.into()),
                }
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<user_registrations::Model>, LifecycleError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<user_registrations::Model, LifecycleError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound(NOT_FOUND))
    }

    pub async fn count(&self) -> Result<u64, LifecycleError> {
        Ok(self.store.count().await?)
    }

    /// Each slot that receives a new file drops its previous object first.
    #[tracing::instrument(name = "Updating user registration", skip(self, changes, files))]
    pub async fn update(
        &self,
        id: Uuid,
        mut changes: RegistrationChanges,
        files: &Attachments,
    ) -> Result<user_registrations::Model, LifecycleError> {
        let current = self.get_by_id(id).await?;

        let mut uploaded = Vec::new();
        for slot in AttachmentSlot::ALL {
            let Some(file) = slot.select(files) else {
                continue;
            };
            if let Some(old_url) = stored_url(&current, slot) {
                self.release(id, slot, old_url).await;
            }
            let url = self.attachments.upload(file).await.inspect_err(|e| {
                if !uploaded.is_empty() {
                    tracing::warn!(registration_id = %id, error = %e, orphaned = ?uploaded, "Upload failed, earlier uploads are orphaned");
                }
            })?;
            match slot {
                AttachmentSlot::LinkedinScreenshot => {
                    changes.linkedin_post_screenshot_url = Some(url.clone())
                }
                AttachmentSlot::PaymentScreenshot => {
                    changes.payment_screenshot_url = Some(url.clone())
                }
            }
            uploaded.push(url);
        }

        self.store.update(id, changes).await.map_err(|e| {
            if !uploaded.is_empty() {
                tracing::warn!(registration_id = %id, error = %e, orphaned = ?uploaded, "Registration was not updated, uploads are orphaned");
            }
            match e {
                StoreError::NotFound => LifecycleError::NotFound(NOT_FOUND),
                StoreError::UniqueViolation => LifecycleError::DuplicateEmail,
                other => other.into(),
            }
        })
    }

    /// Screenshots go first, then the record.
    #[tracing::instrument(name = "Deleting user registration", skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), LifecycleError> {
        let current = self.get_by_id(id).await?;

        for slot in AttachmentSlot::ALL {
            if let Some(url) = stored_url(&current, slot) {
                self.release(id, slot, url).await;
            }
        }

        self.store.delete(id).await.map_err(|e| match e {
            StoreError::NotFound => LifecycleError::NotFound(NOT_FOUND),
            other => other.into(),
        })
    }

    async fn release(&self, id: Uuid, slot: AttachmentSlot, url: &str) {
        if let Err(e) = self.attachments.delete(url).await {
            tracing::warn!(
                registration_id = %id,
                slot = slot.as_str(),
                url,
                error = %e,
                "Failed to delete attachment, object is orphaned"
            );
        }
    }
}

fn stored_url(record: &user_registrations::Model, slot: AttachmentSlot) -> Option<&str> {
    match slot {
        AttachmentSlot::LinkedinScreenshot => record.linkedin_post_screenshot_url.as_deref(),
        AttachmentSlot::PaymentScreenshot => record.payment_screenshot_url.as_deref(),
    }
}

//! In-memory stand-ins for the record and attachment stores.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DbErr;
use uuid::Uuid;

use crate::domain::{
    AmbassadorChanges, NewAmbassadorApplication, NewUserRegistration, RegistrationChanges,
    UploadedFile,
};
use crate::entities::{campus_ambassadors, user_registrations};
use crate::repository::{AmbassadorStore, RegistrationStore, StoreError};
use crate::storage::{AttachmentError, AttachmentStore};

fn unavailable() -> StoreError {
    StoreError::Database(DbErr::Custom("connection refused".into()))
}

#[derive(Default)]
pub(crate) struct InMemoryAmbassadorStore {
    records: Mutex<BTreeMap<Uuid, campus_ambassadors::Model>>,
    unavailable: bool,
}

impl InMemoryAmbassadorStore {
    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AmbassadorStore for InMemoryAmbassadorStore {
    async fn create(
        &self,
        application: NewAmbassadorApplication,
    ) -> Result<campus_ambassadors::Model, StoreError> {
        self.check()?;
        let now = Utc::now();
        let record = campus_ambassadors::Model {
            id: Uuid::new_v4(),
            name: application.name,
            college_name: application.college_name,
            linkedin_url: application.linkedin_url,
            phone: application.phone,
            email: application.email,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .expect("store mutex poisoned")
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<campus_ambassadors::Model>, StoreError> {
        self.check()?;
        Ok(self.records.lock().expect("store mutex poisoned").get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<campus_ambassadors::Model>, StoreError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: AmbassadorChanges,
    ) -> Result<campus_ambassadors::Model, StoreError> {
        self.check()?;
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let record = guard.get_mut(&id).ok_or(StoreError::NotFound)?;
        changes.apply_to(record);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.check()?;
        self.records
            .lock()
            .expect("store mutex poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// Enforces email uniqueness the way the database constraint does.
#[derive(Default)]
pub(crate) struct InMemoryRegistrationStore {
    records: Mutex<BTreeMap<Uuid, user_registrations::Model>>,
    unavailable: bool,
}

impl InMemoryRegistrationStore {
    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn create(
        &self,
        registration: NewUserRegistration,
    ) -> Result<user_registrations::Model, StoreError> {
        self.check()?;
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.values().any(|r| r.email == registration.email) {
            return Err(StoreError::UniqueViolation);
        }
        let now = Utc::now();
        let record = user_registrations::Model {
            id: Uuid::new_v4(),
            first_name: registration.first_name,
            last_name: registration.last_name,
            email: registration.email,
            phone: registration.phone,
            organization: registration.organization,
            role: registration.role,
            preferred_theme: registration.preferred_theme,
            experience_level: registration.experience_level,
            technical_skills: registration.technical_skills,
            motivation: registration.motivation,
            linkedin_post_link: registration.linkedin_post_link,
            linkedin_post_screenshot_url: registration.linkedin_post_screenshot_url,
            payment_screenshot_url: registration.payment_screenshot_url,
            created_at: now,
            updated_at: now,
        };
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<user_registrations::Model>, StoreError> {
        self.check()?;
        Ok(self.records.lock().expect("store mutex poisoned").get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<user_registrations::Model>, StoreError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .values()
            .find(|r| r.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<user_registrations::Model>, StoreError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.check()?;
        Ok(self.len() as u64)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RegistrationChanges,
    ) -> Result<user_registrations::Model, StoreError> {
        self.check()?;
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let mut updated = guard.get(&id).cloned().ok_or(StoreError::NotFound)?;
        changes.apply_to(&mut updated);
        if guard
            .values()
            .any(|r| r.id != id && r.email == updated.email)
        {
            return Err(StoreError::UniqueViolation);
        }
        updated.updated_at = Utc::now();
        guard.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.check()?;
        self.records
            .lock()
            .expect("store mutex poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// Records every call and hands out `https://cdn.test/<n>-<file name>` URLs.
#[derive(Default)]
pub(crate) struct RecordingAttachmentStore {
    sequence: AtomicUsize,
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: bool,
    fail_deletes: bool,
}

impl RecordingAttachmentStore {
    pub(crate) fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Default::default()
        }
    }

    pub(crate) fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Default::default()
        }
    }

    /// File names of every upload attempt, in order.
    pub(crate) fn uploads(&self) -> Vec<String> {
        self.uploads.lock().expect("attachment mutex poisoned").clone()
    }

    /// URLs of every delete attempt, in order.
    pub(crate) fn deletes(&self) -> Vec<String> {
        self.deletes.lock().expect("attachment mutex poisoned").clone()
    }
}

#[async_trait]
impl AttachmentStore for RecordingAttachmentStore {
    async fn upload(&self, file: &UploadedFile) -> Result<String, AttachmentError> {
        if self.fail_uploads {
            return Err(AttachmentError::Upload("access denied".into()));
        }
        let name = file.file_name.clone().unwrap_or_default();
        self.uploads
            .lock()
            .expect("attachment mutex poisoned")
            .push(name.clone());
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("https://cdn.test/{n}-{name}"))
    }

    async fn delete(&self, url: &str) -> Result<(), AttachmentError> {
        self.deletes
            .lock()
            .expect("attachment mutex poisoned")
            .push(url.to_string());
        if self.fail_deletes {
            return Err(AttachmentError::Delete("bucket unreachable".into()));
        }
        Ok(())
    }
}

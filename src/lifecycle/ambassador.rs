use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{AmbassadorChanges, AmbassadorSubmission, NewAmbassadorApplication};
use crate::entities::campus_ambassadors;
use crate::repository::{AmbassadorStore, StoreError};

use super::LifecycleError;

const NOT_FOUND: &str = "Application not found";

pub struct AmbassadorLifecycle {
    store: Arc<dyn AmbassadorStore>,
}

impl AmbassadorLifecycle {
    pub fn new(store: Arc<dyn AmbassadorStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(
        name = "Submitting campus ambassador application",
        skip(self, submission),
        fields(ambassador_email = ?submission.email)
    )]
    pub async fn submit(
        &self,
        submission: AmbassadorSubmission,
    ) -> Result<campus_ambassadors::Model, LifecycleError> {
        let application =
            NewAmbassadorApplication::parse(submission).map_err(LifecycleError::Validation)?;
        Ok(self.store.create(application).await?)
    }

    pub async fn list(&self) -> Result<Vec<campus_ambassadors::Model>, LifecycleError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<campus_ambassadors::Model, LifecycleError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound(NOT_FOUND))
    }

    #[tracing::instrument(name = "Updating campus ambassador application", skip(self, changes))]
    pub async fn update(
        &self,
        id: Uuid,
        changes: AmbassadorChanges,
    ) -> Result<campus_ambassadors::Model, LifecycleError> {
        self.get_by_id(id).await?;
        changes.validate().map_err(LifecycleError::Validation)?;
        self.store.update(id, changes).await.map_err(not_found)
    }

    #[tracing::instrument(name = "Deleting campus ambassador application", skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), LifecycleError> {
        self.get_by_id(id).await?;
        self.store.delete(id).await.map_err(not_found)
    }
}

/// The record can vanish between the existence check and the write.
fn not_found(err: StoreError) -> LifecycleError {
    match err {
        StoreError::NotFound => LifecycleError::NotFound(NOT_FOUND),
        other => other.into(),
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::domain::{AmbassadorChanges, NewAmbassadorApplication};
use crate::entities::campus_ambassadors;

use super::{AmbassadorStore, StoreError};

#[derive(Clone)]
pub struct PgAmbassadorStore {
    db: DatabaseConnection,
}

impl PgAmbassadorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AmbassadorStore for PgAmbassadorStore {
    #[tracing::instrument(name = "Inserting ambassador application", skip(self, application))]
    async fn create(
        &self,
        application: NewAmbassadorApplication,
    ) -> Result<campus_ambassadors::Model, StoreError> {
        let now = Utc::now();
        let record = campus_ambassadors::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(application.name),
            college_name: Set(application.college_name),
            linkedin_url: Set(application.linkedin_url),
            phone: Set(application.phone),
            email: Set(application.email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        record.insert(&self.db).await.map_err(|e| {
            tracing::error!("Failed to execute insert query: {:?}", e);
            StoreError::from(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<campus_ambassadors::Model>, StoreError> {
        Ok(campus_ambassadors::Entity::find_by_id(id)
            .one(&self.db)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<campus_ambassadors::Model>, StoreError> {
        Ok(campus_ambassadors::Entity::find().all(&self.db).await?)
    }

    #[tracing::instrument(name = "Updating ambassador application", skip(self, changes))]
    async fn update(
        &self,
        id: Uuid,
        changes: AmbassadorChanges,
    ) -> Result<campus_ambassadors::Model, StoreError> {
        let mut record = campus_ambassadors::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        changes.apply_to(&mut record);
        record.updated_at = Utc::now();

        let active: campus_ambassadors::ActiveModel = record.into();
        Ok(active.reset_all().update(&self.db).await?)
    }

    #[tracing::instrument(name = "Deleting ambassador application", skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = campus_ambassadors::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

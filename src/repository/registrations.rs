use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::domain::{NewUserRegistration, RegistrationChanges};
use crate::entities::user_registrations;

use super::{RegistrationStore, StoreError};

#[derive(Clone)]
pub struct PgRegistrationStore {
    db: DatabaseConnection,
}

impl PgRegistrationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    #[tracing::instrument(
        name = "Inserting user registration",
        skip(self, registration),
        fields(registration_email = %registration.email)
    )]
    async fn create(
        &self,
        registration: NewUserRegistration,
    ) -> Result<user_registrations::Model, StoreError> {
        let now = Utc::now();
        let record = user_registrations::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(registration.first_name),
            last_name: Set(registration.last_name),
            email: Set(registration.email),
            phone: Set(registration.phone),
            organization: Set(registration.organization),
            role: Set(registration.role),
            preferred_theme: Set(registration.preferred_theme),
            experience_level: Set(registration.experience_level),
            technical_skills: Set(registration.technical_skills),
            motivation: Set(registration.motivation),
            linkedin_post_link: Set(registration.linkedin_post_link),
            linkedin_post_screenshot_url: Set(registration.linkedin_post_screenshot_url),
            payment_screenshot_url: Set(registration.payment_screenshot_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        record.insert(&self.db).await.map_err(|e| {
            tracing::error!("Failed to execute insert query: {:?}", e);
            StoreError::from(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<user_registrations::Model>, StoreError> {
        Ok(user_registrations::Entity::find_by_id(id)
            .one(&self.db)
            .await?)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<user_registrations::Model>, StoreError> {
        Ok(user_registrations::Entity::find()
            .filter(user_registrations::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<user_registrations::Model>, StoreError> {
        Ok(user_registrations::Entity::find().all(&self.db).await?)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(user_registrations::Entity::find().count(&self.db).await?)
    }

    #[tracing::instrument(name = "Updating user registration", skip(self, changes))]
    async fn update(
        &self,
        id: Uuid,
        changes: RegistrationChanges,
    ) -> Result<user_registrations::Model, StoreError> {
        let mut record = user_registrations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        changes.apply_to(&mut record);
        record.updated_at = Utc::now();

        let active: user_registrations::ActiveModel = record.into();
        Ok(active.reset_all().update(&self.db).await?)
    }

    #[tracing::instrument(name = "Deleting user registration", skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = user_registrations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

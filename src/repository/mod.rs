//! Persistence of ambassador applications and user registrations.
//!
//! The lifecycles only see the [`AmbassadorStore`] and [`RegistrationStore`]
//! traits; the PostgreSQL implementations live next to them and are handed in
//! at startup.

mod ambassadors;
mod registrations;

use async_trait::async_trait;
use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

use crate::domain::{
    AmbassadorChanges, NewAmbassadorApplication, NewUserRegistration, RegistrationChanges,
};
use crate::entities::{campus_ambassadors, user_registrations};

pub use ambassadors::PgAmbassadorStore;
pub use registrations::PgRegistrationStore;

#[async_trait]
pub trait AmbassadorStore: Send + Sync {
    async fn create(
        &self,
        application: NewAmbassadorApplication,
    ) -> Result<campus_ambassadors::Model, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<campus_ambassadors::Model>, StoreError>;
    async fn find_all(&self) -> Result<Vec<campus_ambassadors::Model>, StoreError>;
    async fn update(
        &self,
        id: Uuid,
        changes: AmbassadorChanges,
    ) -> Result<campus_ambassadors::Model, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn create(
        &self,
        registration: NewUserRegistration,
    ) -> Result<user_registrations::Model, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user_registrations::Model>, StoreError>;
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<user_registrations::Model>, StoreError>;
    async fn find_all(&self) -> Result<Vec<user_registrations::Model>, StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
    async fn update(
        &self,
        id: Uuid,
        changes: RegistrationChanges,
    ) -> Result<user_registrations::Model, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a record with the same unique value already exists")]
    UniqueViolation,
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return StoreError::UniqueViolation;
        }
        match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

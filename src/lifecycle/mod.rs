//! Validation and record lifecycle rules for both submission kinds.

mod ambassador;
mod registration;

pub use ambassador::AmbassadorLifecycle;
pub use registration::RegistrationLifecycle;

use crate::repository::StoreError;
use crate::storage::AttachmentError;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error("{0}")]
    Unexpected(String),
}

impl LifecycleError {
    /// Client mistakes are reported as they are; anything else is logged and
    /// replaced by `message`.
    pub fn generic(self, message: &str) -> Self {
        match self {
            LifecycleError::Validation(_)
            | LifecycleError::DuplicateEmail
            | LifecycleError::NotFound(_) => self,
            other => {
                tracing::error!(error = ?other, "{}", message);
                LifecycleError::Unexpected(message.to_string())
            }
        }
    }
}

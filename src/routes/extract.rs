use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::{Attachments, UploadedFile};
use crate::lifecycle::LifecycleError;

/// Record id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub Uuid);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = LifecycleError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|e| LifecycleError::Validation(e.body_text()))?;
        Ok(RecordId(id))
    }
}

/// `Json` whose rejections use the common error body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = LifecycleError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| LifecycleError::Validation(e.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// Text fields and files of a submission.
///
/// `multipart/form-data` bodies put text parts into the fields and parts that
/// carry a filename into the attachments, keyed by part name. JSON bodies only
/// carry fields.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    fields: Map<String, Value>,
    attachments: Attachments,
}

impl SubmissionForm {
    /// Deserializes the text fields into `T` and hands back the files alongside.
    pub fn into_parts<T: DeserializeOwned>(self) -> Result<(T, Attachments), LifecycleError> {
        let fields = serde_json::from_value(Value::Object(self.fields))
            .map_err(|e| LifecycleError::Validation(e.to_string()))?;
        Ok((fields, self.attachments))
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, LifecycleError> {
        let mut form = SubmissionForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| LifecycleError::Validation(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| LifecycleError::Validation(e.body_text()))?;
                    // Browsers send an empty part for a file input left blank.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.attachments.push(
                        name,
                        UploadedFile {
                            file_name: Some(file_name),
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| LifecycleError::Validation(e.body_text()))?;
                    form.fields.insert(name, Value::String(text));
                }
            }
        }

        Ok(form)
    }
}

impl<S> FromRequest<S> for SubmissionForm
where
    S: Send + Sync,
{
    type Rejection = LifecycleError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| LifecycleError::Validation(e.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(fields) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| LifecycleError::Validation(e.body_text()))?;
            Ok(SubmissionForm {
                fields,
                attachments: Attachments::new(),
            })
        } else {
            Err(LifecycleError::Validation(
                "Expected a multipart/form-data or application/json body".into(),
            ))
        }
    }
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::{RegistrationChanges, RegistrationSubmission};
use crate::entities::user_registrations;
use crate::lifecycle::{LifecycleError, RegistrationLifecycle};

use super::{RecordId, SubmissionForm};

type RegistrationState = State<Arc<RegistrationLifecycle>>;

pub fn registration_routes(lifecycle: Arc<RegistrationLifecycle>) -> Router {
    Router::new()
        .route("/registrations", post(submit).get(list))
        .route("/registrations/count", get(count))
        .route(
            "/registrations/{id}",
            get(fetch).put(update).delete(remove),
        )
        .with_state(lifecycle)
}

#[tracing::instrument(
    name = "Receiving user registration",
    skip(lifecycle, form),
    fields(request_id = %Uuid::new_v4())
)]
async fn submit(
    State(lifecycle): RegistrationState,
    form: SubmissionForm,
) -> Result<(StatusCode, Json<user_registrations::Model>), LifecycleError> {
    let (submission, files) = form.into_parts::<RegistrationSubmission>()?;
    let record = lifecycle.submit(submission, &files).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list(
    State(lifecycle): RegistrationState,
) -> Result<Json<Vec<user_registrations::Model>>, LifecycleError> {
    Ok(Json(lifecycle.list().await?))
}

async fn count(State(lifecycle): RegistrationState) -> Result<Json<Value>, LifecycleError> {
    let count = lifecycle.count().await?;
    Ok(Json(json!({ "count": count })))
}

async fn fetch(
    State(lifecycle): RegistrationState,
    RecordId(id): RecordId,
) -> Result<Json<user_registrations::Model>, LifecycleError> {
    Ok(Json(lifecycle.get_by_id(id).await?))
}

#[tracing::instrument(
    name = "Receiving user registration update",
    skip(lifecycle, form),
    fields(request_id = %Uuid::new_v4())
)]
async fn update(
    State(lifecycle): RegistrationState,
    RecordId(id): RecordId,
    form: SubmissionForm,
) -> Result<Json<user_registrations::Model>, LifecycleError> {
    let (changes, files) = form.into_parts::<RegistrationChanges>()?;
    Ok(Json(lifecycle.update(id, changes, &files).await?))
}

async fn remove(
    State(lifecycle): RegistrationState,
    RecordId(id): RecordId,
) -> Result<Json<Value>, LifecycleError> {
    lifecycle.delete(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Application deleted successfully",
    })))
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::{AmbassadorChanges, AmbassadorSubmission};
use crate::lifecycle::{AmbassadorLifecycle, LifecycleError};

use super::{JsonBody, RecordId};

type AmbassadorState = State<Arc<AmbassadorLifecycle>>;

pub fn ambassador_routes(lifecycle: Arc<AmbassadorLifecycle>) -> Router {
    Router::new()
        .route("/applications", post(submit).get(list))
        .route(
            "/applications/{id}",
            get(fetch).put(update).delete(remove),
        )
        .with_state(lifecycle)
}

#[tracing::instrument(
    name = "Receiving campus ambassador application",
    skip(lifecycle, submission),
    fields(request_id = %Uuid::new_v4())
)]
async fn submit(
    State(lifecycle): AmbassadorState,
    JsonBody(submission): JsonBody<AmbassadorSubmission>,
) -> Result<(StatusCode, Json<Value>), LifecycleError> {
    let record = lifecycle.submit(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Application submitted successfully",
            "data": record,
        })),
    ))
}

async fn list(State(lifecycle): AmbassadorState) -> Result<Json<Value>, LifecycleError> {
    let records = lifecycle.list().await?;
    Ok(Json(json!({ "success": true, "data": records })))
}

async fn fetch(
    State(lifecycle): AmbassadorState,
    RecordId(id): RecordId,
) -> Result<Json<Value>, LifecycleError> {
    let record = lifecycle.get_by_id(id).await?;
    Ok(Json(json!({ "success": true, "data": record })))
}

#[tracing::instrument(
    name = "Receiving campus ambassador update",
    skip(lifecycle, changes),
    fields(request_id = %Uuid::new_v4())
)]
async fn update(
    State(lifecycle): AmbassadorState,
    RecordId(id): RecordId,
    JsonBody(changes): JsonBody<AmbassadorChanges>,
) -> Result<Json<Value>, LifecycleError> {
    let record = lifecycle.update(id, changes).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Application updated",
        "data": record,
    })))
}

async fn remove(
    State(lifecycle): AmbassadorState,
    RecordId(id): RecordId,
) -> Result<Json<Value>, LifecycleError> {
    lifecycle.delete(id).await?;
    Ok(Json(json!({ "success": true, "message": "Application deleted" })))
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::lifecycle::LifecycleError;

impl LifecycleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LifecycleError::Validation(_) | LifecycleError::DuplicateEmail => {
                StatusCode::BAD_REQUEST
            }
            LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
            LifecycleError::Store(_)
            | LifecycleError::Attachment(_)
            | LifecycleError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LifecycleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        let body = Json(json!({ "success": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}

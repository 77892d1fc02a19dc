use axum::http::StatusCode;

/// Liveness probe; answers as soon as the listener accepts connections.
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

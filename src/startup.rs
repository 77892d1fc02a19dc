use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::lifecycle::{AmbassadorLifecycle, RegistrationLifecycle};
use crate::repository::{PgAmbassadorStore, PgRegistrationStore};
use crate::routes::{ambassador_routes, health_check, registration_routes};
use crate::storage::{AttachmentStore, UploadsMount};

/// Assembles every route behind the shared HTTP layers.
///
/// `uploads` serves the files of a local attachment store at their public URLs.
pub fn app(
    ambassadors: Arc<AmbassadorLifecycle>,
    registrations: Arc<RegistrationLifecycle>,
    max_upload_bytes: usize,
    uploads: Option<UploadsMount>,
) -> Router {
    let mut router = Router::new()
        .route("/health_check", get(health_check))
        .merge(ambassador_routes(ambassadors))
        .merge(registration_routes(registrations));
    if let Some(uploads) = uploads {
        router = router.nest_service(&uploads.path, ServeDir::new(uploads.directory));
    }

    router
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

pub async fn run(
    listener: TcpListener,
    db: DatabaseConnection,
    attachments: Arc<dyn AttachmentStore>,
    max_upload_bytes: usize,
    uploads: Option<UploadsMount>,
) -> std::io::Result<()> {
    let ambassadors = AmbassadorLifecycle::new(Arc::new(PgAmbassadorStore::new(db.clone())));
    let registrations =
        RegistrationLifecycle::new(Arc::new(PgRegistrationStore::new(db)), attachments);

    let app = app(
        Arc::new(ambassadors),
        Arc::new(registrations),
        max_upload_bytes,
        uploads,
    );
    axum::serve(listener, app).await
}

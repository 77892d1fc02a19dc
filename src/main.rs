use migration::{Migrator, MigratorTrait};
use registration_portal::{
    configuration::get_configuration,
    startup::run,
    storage::{UploadsMount, build_attachment_store},
    telemetry::{get_subscriber, init_subscriber},
};
use sea_orm::Database;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = get_subscriber(
        "registration_portal".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let configuration = get_configuration()?;

    let db = Database::connect(configuration.database.with_db().expose_secret().as_str()).await?;
    Migrator::up(&db, None).await?;

    let attachments = build_attachment_store(&configuration.storage).await?;
    let uploads = UploadsMount::from_settings(&configuration.storage)?;

    let address = configuration.application.address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "Listening");

    run(
        listener,
        db,
        attachments,
        configuration.application.max_upload_bytes,
        uploads,
    )
    .await?;
    Ok(())
}

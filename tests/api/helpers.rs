use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use once_cell::sync::Lazy;
use registration_portal::{
    configuration::{DatabaseSettings, get_configuration},
    storage::{LocalAttachmentStore, UploadsMount},
    telemetry::{get_subscriber, init_subscriber},
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use secrecy::ExposeSecret;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Run with TEST_LOG=true to see the logs.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db: DatabaseConnection,
    pub uploads: TempDir,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn post_application(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/applications", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_registration(&self, form: reqwest::multipart::Form) -> reqwest::Response {
        self.client
            .post(format!("{}/registrations", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Number of screenshot files currently on disk.
    pub fn stored_files(&self) -> usize {
        match std::fs::read_dir(self.uploads.path()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

pub fn screenshot(file_name: &str) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(b"\x89PNG fake screenshot".to_vec())
        .file_name(file_name.to_string())
        .mime_str("image/png")
        .expect("Invalid mime type")
}

pub async fn spawn_app() -> TestApp {
    // Only the first call initialises tracing.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_configuration().expect("Failed to read configuration.");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();
    let db = configure_database(&configuration.database).await;

    let uploads = tempfile::tempdir().expect("Failed to create upload directory");
    let attachments = LocalAttachmentStore::new(
        uploads.path().to_path_buf(),
        String::new(),
        format!("{}/uploads", address),
    );
    let mount = UploadsMount {
        path: "/uploads".into(),
        directory: uploads.path().to_path_buf(),
    };

    let _ = tokio::spawn(registration_portal::startup::run(
        listener,
        db.clone(),
        Arc::new(attachments),
        configuration.application.max_upload_bytes,
        Some(mount),
    ));

    TestApp {
        address,
        db,
        uploads,
        client: reqwest::Client::builder().no_proxy().build().unwrap(),
    }
}

/// Creates a fresh database for one test and runs the migrations on it.
pub async fn configure_database(config: &DatabaseSettings) -> DatabaseConnection {
    let db = Database::connect(config.without_db().expose_secret().as_str())
        .await
        .expect("Failed to connect to Postgres");
    db.execute_unprepared(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database");

    let db = Database::connect(config.with_db().expose_secret().as_str())
        .await
        .expect("Failed to connect to the test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to migrate the test database");

    db
}

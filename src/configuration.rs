use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretBox};

#[derive(serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub storage: StorageSettings,
}

#[derive(serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: SecretBox<String>,
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default)]
    pub require_ssl: bool,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    /// Upper bound for a whole request body, screenshots included.
    pub max_upload_bytes: usize,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Prefix of every URL handed out for a stored object.
    pub public_base_url: String,
    pub key_prefix: String,
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Custom S3 endpoint, e.g. MinIO or LocalStack.
    pub endpoint: Option<String>,
    pub local_directory: Option<PathBuf>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base")))
        .add_source(config::File::from(
            configuration_directory.join(environment.as_str()),
        ))
        // APP_APPLICATION__PORT=5001 sets `application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

impl DatabaseSettings {
    pub fn with_db(&self) -> SecretBox<String> {
        SecretBox::init_with(|| {
            format!(
                "postgres://{}:{}@{}:{}/{}{}",
                self.username,
                self.password.expose_secret(),
                self.host,
                self.port,
                self.database_name,
                self.ssl_suffix()
            )
        })
    }

    pub fn without_db(&self) -> SecretBox<String> {
        SecretBox::init_with(|| {
            format!(
                "postgres://{}:{}@{}:{}{}",
                self.username,
                self.password.expose_secret(),
                self.host,
                self.port,
                self.ssl_suffix()
            )
        })
    }

    fn ssl_suffix(&self) -> &'static str {
        if self.require_ssl {
            "?sslmode=require"
        } else {
            ""
        }
    }
}

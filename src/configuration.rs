//! src/configuration.rs
use crate::domain::FieldError;
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to determine the current directory")]
    CurrentDir(#[source] std::io::Error),
    #[error("{0}")]
    Environment(String),
    #[error("Failed to load configuration files")]
    Files(#[from] config::ConfigError),
    #[error("Failed to read the local environment file")]
    DotEnv(#[source] dotenvy::Error),
    #[error("Failed to parse SUBSCRIBE_ overrides from environment")]
    Overrides(#[from] envy::Error),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub subscribe: SubscribeSettings,
    #[serde(default)]
    pub form: FormCopy,
    #[serde(default)]
    pub toast: ToastSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubscribeSettings {
    pub base_url: String,
    #[serde(default = "default_subscribe_path")]
    pub path: String,
    #[serde(default)]
    pub timeout_milliseconds: Option<u64>,
}

fn default_subscribe_path() -> String {
    "/api/subscribe.json".into()
}

impl SubscribeSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: default_subscribe_path(),
            timeout_milliseconds: None,
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

/// Every piece of text the form shows.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FormCopy {
    pub name_label: String,
    pub name_placeholder: String,
    pub email_label: String,
    pub email_placeholder: String,
    pub submit_caption: String,
    pub loading_caption: String,
    pub name_required: String,
    pub email_invalid: String,
    pub failure_message: String,
}

impl Default for FormCopy {
    fn default() -> Self {
        Self {
            name_label: "Seu nome".into(),
            name_placeholder: "Mc Lovin".into(),
            email_label: "Seu e-mail".into(),
            email_placeholder: "ex: email@email.com".into(),
            submit_caption: "Assinar".into(),
            loading_caption: "Carregando...".into(),
            name_required: "Preencha seu nome".into(),
            email_invalid: "E-mail inválido".into(),
            failure_message: "Failed to submit email".into(),
        }
    }
}

impl FormCopy {
    /// Inline text shown next to a field that failed validation.
    pub fn message_for(&self, error: &FieldError) -> &str {
        match error {
            FieldError::NameRequired => &self.name_required,
            FieldError::EmailRequired | FieldError::EmailInvalid => &self.email_invalid,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ToastSettings {
    pub success_milliseconds: u64,
    pub error_milliseconds: u64,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            success_milliseconds: 2000,
            error_milliseconds: 4000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct SubscribeOverrides {
    base_url: Option<String>,
    timeout_milliseconds: Option<u64>,
}

impl Settings {
    fn apply(&mut self, overrides: SubscribeOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.subscribe.base_url = base_url;
        }
        if let Some(timeout) = overrides.timeout_milliseconds {
            self.subscribe.timeout_milliseconds = Some(timeout);
        }
    }
}

#[derive(Debug, PartialEq)]
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
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir().map_err(ConfigurationError::CurrentDir)?;

    // Default to `local` if not specified.
    let environment = Environment::try_from(
        std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into()),
    )
    .map_err(ConfigurationError::Environment)?;

    load(&base_path.join("configuration"), &environment)
}

/// Layers `base` and the environment file found in `configuration_directory`,
/// then applies `SUBSCRIBE_` overrides from the process environment.
pub fn load(
    configuration_directory: &Path,
    environment: &Environment,
) -> Result<Settings, ConfigurationError> {
    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(true))
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;

    if *environment == Environment::Local {
        load_dotenv(&configuration_directory.join("subscribe.env"))?;
    }

    settings.apply(overrides_from(std::env::vars())?);

    Ok(settings)
}

/// A missing file is fine; a malformed one is not.
fn load_dotenv(path: &Path) -> Result<(), ConfigurationError> {
    match dotenvy::from_filename(path) {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigurationError::DotEnv(e)),
    }
}

fn overrides_from<I>(vars: I) -> Result<SubscribeOverrides, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::prefixed("SUBSCRIBE_").from_iter(vars)
}

use std::{path::PathBuf, str::FromStr};

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::sqlite::SqliteConnectOptions;
use strum::{Display, EnumString};

use crate::domain::search::{PromptBuilder, Result, SearchError};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub model: ModelSettings,
    #[serde(default)]
    pub search: SearchSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    /// e.g. `sqlite://data.db`
    pub url: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_connections: u32,
    pub create_if_missing: bool,
}

#[derive(Deserialize, Clone)]
pub struct ModelSettings {
    pub provider: ModelProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SearchSettings {
    /// Replaces the built-in extraction instructions when set
    pub prompt_template_path: Option<PathBuf>,
}

#[derive(Deserialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModelProvider {
    Gemini,
    OpenaiCompat,
}

impl ModelProvider {
    /// Environment variable consulted when `model.api_key` is unset.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ModelProvider::Gemini => "GEMINI_API_KEY",
            ModelProvider::OpenaiCompat => "OPENAI_API_KEY",
        }
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<SqliteConnectOptions> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(self.create_if_missing);
        Ok(options)
    }
}

impl SearchSettings {
    pub fn prompt_builder(&self) -> Result<PromptBuilder> {
        match &self.prompt_template_path {
            Some(path) => {
                let template = std::fs::read_to_string(path).map_err(|e| {
                    SearchError::Config(format!(
                        "failed to read prompt template {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(PromptBuilder::new(template))
            }
            None => Ok(PromptBuilder::default()),
        }
    }
}

pub fn read_config() -> std::result::Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("current directory: {}", e)))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("APP_ENVIRONMENT: {}", e)))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(
            config::File::from(config_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("ESTATE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

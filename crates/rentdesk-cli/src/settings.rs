//! Runtime settings.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `rentdesk.toml` (or the file passed with `--config`), then environment
//! variables prefixed with `RENTDESK__`, e.g. `RENTDESK__SERVICE__BUFFER_DAYS=2`.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use rentdesk_booking::ServiceConfig;
use rentdesk_storage::DatabaseConfig;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_FILE: &str = "rentdesk";
const ENV_PREFIX: &str = "RENTDESK";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Log {
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: Log,
    pub database: DatabaseConfig,
    pub service: ServiceConfig,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };

        Self::from_builder(
            Config::builder()
                .add_source(file)
                .add_source(Self::environment()),
        )
    }

    /// `RENTDESK__SECTION__KEY` variables, values parsed as numbers or booleans where possible.
    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings
            .service
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(settings)
    }
}

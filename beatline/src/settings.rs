use std::path::PathBuf;

use clap::Parser;
use config::Config;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

mod action_settings;
mod module_settings;
mod period;

pub use action_settings::*;
pub use module_settings::ModuleSettings;
pub use period::{format_period, parse_period, PeriodString};

/// Prefix of environment variables that override file settings, e.g. `APP__MODULES`.
pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSettings>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleSettings>,
}

impl Settings {
    /// Loads settings from the configured file, if any, overlaid with `APP__` environment
    /// variables, and validates the result.
    #[tracing::instrument(level = "info")]
    pub fn load(options: &CliOptions) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = options.config.as_ref() {
            tracing::info!(config_path=?path, "loading settings from file.");
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for module in self.modules.iter() {
            if let Err(err) = module.validate() {
                tracing::error!(error=?err, module=%module.module(), "invalid module settings");
                return Err(err);
            }
        }

        Ok(())
    }
}

#[derive(Parser, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[clap(author, version, about)]
pub struct CliOptions {
    /// settings file to load; RON, YAML, JSON and TOML are recognized by extension.
    /// Without one, settings come only from `APP__` environment variables.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// JSON-lines file of events to process. Events are read from stdin when absent.
    #[clap(short, long)]
    pub input: Option<PathBuf>,
}

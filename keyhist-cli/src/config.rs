use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SETTINGS_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "KEYHIST_";

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

/// Thresholds applied when aggregating and validating histograms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationSettings {
    pub min_time_to_type: u64,
    pub max_time_to_type: u64,
    pub min_complexity: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        keyhist::Configuration::default().into()
    }
}

impl From<keyhist::Configuration> for ValidationSettings {
    fn from(config: keyhist::Configuration) -> Self {
        Self {
            min_time_to_type: config.min_time_to_type,
            max_time_to_type: config.max_time_to_type,
            min_complexity: config.min_complexity,
        }
    }
}

impl From<ValidationSettings> for keyhist::Configuration {
    fn from(settings: ValidationSettings) -> Self {
        Self {
            min_time_to_type: settings.min_time_to_type,
            max_time_to_type: settings.max_time_to_type,
            min_complexity: settings.min_complexity,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    pub validation: ValidationSettings,
}

impl Settings {
    /// Load settings from defaults, `settings.toml` in the config directory and the environment
    ///
    /// The config directory is `override_path` if given, the platform config directory
    /// otherwise. A missing directory or file just means defaults.
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Self::default()));

        let config_dir = override_path.or_else(|| {
            ProjectDirs::from("com", "keyhist", "keyhist")
                .map(|dirs| dirs.config_dir().to_path_buf())
        });

        if let Some(config_dir) = config_dir {
            let settings_toml = config_dir.join(SETTINGS_FILE);
            if settings_toml.exists() {
                tracing::debug!(path = %settings_toml.display(), "loading settings");
                settings = settings.merge(Toml::file(settings_toml));
            }
        } else {
            tracing::warn!("no configuration directory found, using defaults");
        }

        let settings = settings
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        Ok(settings)
    }

    pub fn configuration(&self) -> keyhist::Configuration {
        self.validation.into()
    }
}

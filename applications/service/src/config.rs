/// Service configuration
use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tale_playback::ControllerConfig;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "tale.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub playback: ControllerConfig,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_engine")]
    pub engine: EngineSettings,

    #[serde(default = "default_focus")]
    pub focus: FocusSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// JSON array of profiles
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSettings {
    /// Time the simulated engine takes to become ready
    #[serde(default = "default_prepare_delay_ms")]
    pub prepare_delay_ms: u64,

    /// Length of every simulated track
    #[serde(default = "default_track_length_secs")]
    pub track_length_secs: u64,
}

impl EngineSettings {
    pub fn prepare_delay(&self) -> Duration {
        Duration::from_millis(self.prepare_delay_ms)
    }

    pub fn track_length(&self) -> Duration {
        Duration::from_secs(self.track_length_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FocusSettings {
    /// Refuse every focus request
    #[serde(default)]
    pub deny: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl ServiceConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `tale.toml` in the working
    /// directory is used if present. `TALE_` variables override both, with
    /// `__` between nested keys (`TALE_ENGINE__PREPARE_DELAY_MS=50`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ServiceError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with TALE_)
        settings = settings.add_source(
            config::Environment::with_prefix("TALE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.seek_step_ms == 0 {
            return Err(ServiceError::Config(
                "playback.seek_step_ms must be greater than zero".to_string(),
            ));
        }

        if self.playback.duck_attenuation_db > 0.0 {
            return Err(ServiceError::Config(format!(
                "playback.duck_attenuation_db must not be positive (got {})",
                self.playback.duck_attenuation_db
            )));
        }

        if self.engine.track_length_secs == 0 {
            return Err(ServiceError::Config(
                "engine.track_length_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        path: default_catalog_path(),
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("profiles.json")
}

fn default_engine() -> EngineSettings {
    EngineSettings {
        prepare_delay_ms: default_prepare_delay_ms(),
        track_length_secs: default_track_length_secs(),
    }
}

fn default_prepare_delay_ms() -> u64 {
    200
}

fn default_track_length_secs() -> u64 {
    300
}

fn default_focus() -> FocusSettings {
    FocusSettings { deny: false }
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_log_filter(),
    }
}

fn default_log_filter() -> String {
    "tale_service=info,tale_playback=info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            playback: ControllerConfig::default(),
            catalog: default_catalog(),
            engine: default_engine(),
            focus: default_focus(),
            logging: default_logging(),
        }
    }
}

//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml` in the working directory, then `OPENLS_` environment
//! variables. Nested keys use a double underscore, e.g.
//! `OPENLS_SERVICE__BASE_URL` or `OPENLS_LOCATION__FIX_TIMEOUT_SECS`.

use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use domain::Coordinate;
use integration_openls::OpenLsConfig;
use serde::{Deserialize, Serialize};

/// Environment variable prefix
const ENV_PREFIX: &str = "OPENLS";

/// Device location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Seconds to wait for the first fix; 0 waits indefinitely
    #[serde(default)]
    pub fix_timeout_secs: u64,

    /// Position reported by the static sensor
    #[serde(default)]
    pub position: Option<Coordinate>,
}

impl LocationConfig {
    /// Fix timeout, if one is configured
    #[must_use]
    pub const fn fix_timeout(&self) -> Option<Duration> {
        if self.fix_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.fix_timeout_secs))
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenLS service settings
    #[serde(default)]
    pub service: OpenLsConfig,

    /// Device location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a TOML string on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value has the wrong
    /// type.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = OpenLsConfig::default();
        config::Config::builder()
            .set_default("service.base_url", defaults.base_url)?
            .set_default("service.timeout_secs", defaults.timeout_secs)?
            .set_default("service.language", defaults.language)?
            .set_default("logging.filter", default_log_filter())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.service
            .validate()
            .map_err(|e| format!("service: {e}"))?;

        if let Some(position) = self.location.position {
            if !position.is_valid() {
                return Err(format!("location: position {position} is out of range"));
            }
        }

        Ok(())
    }
}

//! OpenLS service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OpenLS client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenLsConfig {
    /// Base URL of the OpenLS service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Language tag sent with route requests
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum number of geocoder candidates per query
    #[serde(default = "default_max_geocode_results")]
    pub max_geocode_results: u32,

    /// Default accessibility time budget in seconds
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: u64,

    /// Default accessibility interval granularity in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://openls.geog.uni-heidelberg.de".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "de".to_string()
}

const fn default_max_geocode_results() -> u32 {
    20
}

const fn default_time_budget_secs() -> u64 {
    600
}

const fn default_interval_secs() -> u64 {
    300
}

fn default_user_agent() -> String {
    concat!("openls-client/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for OpenLsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            max_geocode_results: default_max_geocode_results(),
            time_budget_secs: default_time_budget_secs(),
            interval_secs: default_interval_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl OpenLsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            max_geocode_results: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_geocode_results == 0 {
            return Err("max_geocode_results must be greater than 0".to_string());
        }

        if self.time_budget_secs < 60 || self.time_budget_secs % 60 != 0 {
            return Err("time_budget_secs must be a positive multiple of 60".to_string());
        }

        if self.interval_secs == 0 || self.interval_secs > self.time_budget_secs {
            return Err("interval_secs must be between 1 and time_budget_secs".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenLsConfig::default();
        assert_eq!(config.base_url, "http://openls.geog.uni-heidelberg.de");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.language, "de");
        assert_eq!(config.max_geocode_results, 20);
        assert_eq!(config.time_budget_secs, 600);
        assert_eq!(config.interval_secs, 300);
        assert!(config.user_agent.starts_with("openls-client/"));
    }

    #[test]
    fn test_testing_config() {
        let config = OpenLsConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_geocode_results, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_success() {
        assert!(OpenLsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = OpenLsConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = OpenLsConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_interval_larger_than_budget() {
        let config = OpenLsConfig {
            time_budget_secs: 300,
            interval_secs: 600,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_budget_in_whole_minutes() {
        for time_budget_secs in [0, 30, 119] {
            let config = OpenLsConfig {
                time_budget_secs,
                interval_secs: 10,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{time_budget_secs}");
        }
        let config = OpenLsConfig {
            time_budget_secs: 120,
            interval_secs: 45,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: OpenLsConfig =
            serde_json::from_str(r#"{ "base_url": "http://localhost:8080" }"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.language, "de");
    }
}

//! Process configuration, read once from the environment at start.

use std::{path::PathBuf, time::Duration};

use sumo_client::{SumoConfig, endpoint_for_region};
use sumo_core::consistency_delay;
use sumo_model::SERVICE_NAME;
use sumo_observe::{DEFAULT_LEVEL, LoggerConfig, LoggerError, LoggerFormat};
use thiserror::Error;

const ENV_PORT: &str = "RCV_PORT";
const ENV_PATH: &str = "RCV_PATH";
const ENV_MODE: &str = "ENV";
const ENV_CONFIGURATION_SERVICE: &str = "CONFIGURATION_SERVICE";
const ENV_EVENT_BROKER: &str = "EVENTBROKER";
const ENV_REGION: &str = "REGION_CODE";
const ENV_ACCESS_ID: &str = "ACCESS_ID";
const ENV_ACCESS_KEY: &str = "ACCESS_KEY";
const ENV_ENDPOINT: &str = "SUMO_END_PT";
const ENV_DELAY: &str = "SLEEP_BEFORE_API_IN_SECONDS";
const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PATH: &str = "/";
const DEFAULT_MODE: &str = "local";
const DEFAULT_EVENT_BROKER: &str = "http://localhost:8081/event";
const DEFAULT_REGION: &str = "us1";
const DEFAULT_ENDPOINT: &str = "https://api.sumologic.com/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a port number, got '{value}'")]
    InvalidPort { key: &'static str, value: String },

    #[error("{key} must be an absolute path, got '{value}'")]
    InvalidPath { key: &'static str, value: String },

    #[error("CONFIGURATION_SERVICE is required unless ENV=local")]
    MissingConfigurationService,

    #[error(transparent)]
    Logger(#[from] LoggerError),
}

/// Where indicator definitions are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// Files below this directory.
    Local(PathBuf),
    /// Keptn configuration service at this URL.
    ConfigurationService(String),
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub port: u16,
    pub path: String,
    pub resources: ResourceSource,
    pub event_broker: String,
    pub sumo: SumoConfig,
    pub consistency_delay: Duration,
    pub logger: LoggerConfig,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`EnvConfig::from_env`] with a custom variable lookup.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match get_env(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                key: ENV_PORT,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let path = string_env(&get_env, ENV_PATH, DEFAULT_PATH);
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidPath {
                key: ENV_PATH,
                value: path,
            });
        }

        let resources = if string_env(&get_env, ENV_MODE, DEFAULT_MODE) == "local" {
            ResourceSource::Local(PathBuf::from("."))
        } else {
            match get_env(ENV_CONFIGURATION_SERVICE).filter(|url| !url.trim().is_empty()) {
                Some(url) => ResourceSource::ConfigurationService(url.trim().to_string()),
                None => return Err(ConfigError::MissingConfigurationService),
            }
        };

        let endpoint = endpoint_for_region(
            &string_env(&get_env, ENV_REGION, DEFAULT_REGION),
            &string_env(&get_env, ENV_ENDPOINT, DEFAULT_ENDPOINT),
        );
        let sumo = SumoConfig::new(
            endpoint,
            get_env(ENV_ACCESS_ID).unwrap_or_default(),
            get_env(ENV_ACCESS_KEY).unwrap_or_default(),
        );

        let logger = LoggerConfig::default()
            .with_level(string_env(&get_env, ENV_LOG_LEVEL, DEFAULT_LEVEL))
            .with_syslog_identifier(SERVICE_NAME)
            .with_format(
                get_env(ENV_LOG_FORMAT)
                    .unwrap_or_default()
                    .parse::<LoggerFormat>()?,
            );

        Ok(Self {
            port,
            path,
            resources,
            event_broker: string_env(&get_env, ENV_EVENT_BROKER, DEFAULT_EVENT_BROKER),
            sumo,
            consistency_delay: consistency_delay(get_env(ENV_DELAY).as_deref()),
            logger,
        })
    }
}

/// Value of `key`, or `default` when unset or blank.
fn string_env<F>(get_env: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

//! Service configuration from environment variables.
//!
//! - `SERVICE_PORT`: HTTP port (default: 8080)
//! - `CROWDNAV_EVENTS_PATH`: JSON file mirroring the event registry (optional)
//! - `CROWDNAV_DEFAULT_RADIUS_M`: auto-zoning radius when a request omits one (default: 500)

use std::path::PathBuf;

use crowdnav_lib::DEFAULT_RADIUS_METERS;
use serde::{Deserialize, Serialize};

/// Port used when `SERVICE_PORT` is unset.
pub const DEFAULT_SERVICE_PORT: u16 = 8080;

const ENV_PORT: &str = "SERVICE_PORT";
const ENV_EVENTS_PATH: &str = "CROWDNAV_EVENTS_PATH";
const ENV_DEFAULT_RADIUS: &str = "CROWDNAV_DEFAULT_RADIUS_M";

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub port: u16,
    /// When set, the event registry is loaded from and written to this file.
    pub events_path: Option<PathBuf>,
    pub default_radius_m: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVICE_PORT,
            events_path: None,
            default_radius_m: DEFAULT_RADIUS_METERS,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the raw value for a key.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match read(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_SERVICE_PORT,
        };

        let default_radius_m = match read(ENV_DEFAULT_RADIUS) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(radius) if radius.is_finite() && radius > 0.0 => radius,
                _ => return Err(ConfigError::InvalidRadius(raw)),
            },
            None => DEFAULT_RADIUS_METERS,
        };

        Ok(Self {
            port,
            events_path: read(ENV_EVENTS_PATH).map(PathBuf::from),
            default_radius_m,
        })
    }
}

/// Errors raised while reading [`ServiceConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `SERVICE_PORT` is not a valid port number.
    InvalidPort(String),
    /// `CROWDNAV_DEFAULT_RADIUS_M` is not a positive number.
    InvalidRadius(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(raw) => {
                write!(f, "{ENV_PORT} must be a port number, got '{raw}'")
            }
            ConfigError::InvalidRadius(raw) => write!(
                f,
                "{ENV_DEFAULT_RADIUS} must be a positive number of meters, got '{raw}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

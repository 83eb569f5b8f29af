//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is read from an optional TOML file; every field has a
//! default. Environment variables override a few values after parsing:
//!
//! - `PORT` - gateway listening port
//! - `TOKENPULSE_API_KEY` - bearer key for the inference client
//!
//! # Example
//!
//! ```no_run
//! use tokenpulse::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("tokenpulse.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::gateway::GatewayConfig;
use super::logging::LoggingConfig;
use super::predictor::PredictorConfig;
use super::upstream::UpstreamConfig;
use crate::adapter::outbound::llm::chat::API_KEY_ENV;
use crate::error::{ConfigError, Result};

/// Environment variable overriding the gateway port.
pub const PORT_ENV: &str = "PORT";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Reverse proxy and static bundle settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Inference client settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Prediction cycle settings.
    #[serde(default)]
    pub predictor: PredictorConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content and apply process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, an override cannot be
    /// parsed, or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration, resolving overrides through `env`.
    ///
    /// # Errors
    ///
    /// Same as [`parse_toml`](Self::parse_toml).
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(env)?;
        config.upstream.link_gateway(&config.gateway);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` if given, otherwise start from defaults.
    ///
    /// Environment overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or validation fails.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::parse_toml(""),
        }
    }

    /// Apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    /// A blank `PORT` counts as unset.
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = env(PORT_ENV).filter(|port| !port.trim().is_empty()) {
            self.gateway.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT",
                reason: format!("'{port}' is not a valid port"),
            })?;
        }
        self.upstream.api_key = env(API_KEY_ENV).filter(|key| !key.is_empty());
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        self.gateway.validate()?;
        self.upstream.validate()?;
        self.predictor.validate()?;
        Ok(())
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

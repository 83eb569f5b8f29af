//! Inference client configuration.
//!
//! Settings for the chat-completions client used by the predictor. The
//! optional bearer key is read from `TOKENPULSE_API_KEY` at runtime, never
//! from the file.

use serde::Deserialize;
use url::Url;

use super::gateway::GatewayConfig;
use crate::error::{ConfigError, Result};

/// Base URL used when neither the file nor a gateway supplies one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api/llama";

/// Upstream inference client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL requests are sent to.
    ///
    /// When unset, the loaded [`Config`](super::settings::Config) points it
    /// at its own gateway (see [`GatewayConfig::local_url`]), so a `PORT`
    /// override moves both sides together.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Endpoint appended to `base_url`. Defaults to `chat`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier. Defaults to `llama`.
    #[serde(default = "default_model")]
    pub model: String,

    /// HTTP request timeout in seconds. Defaults to 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer key loaded from `TOKENPULSE_API_KEY`.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl UpstreamConfig {
    /// Effective base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Fill an unset base URL from the gateway this process would run.
    pub(crate) fn link_gateway(&mut self, gateway: &GatewayConfig) {
        if self.base_url.is_none() {
            self.base_url = Some(gateway.local_url());
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        Url::parse(self.base_url()).map_err(|e| ConfigError::InvalidValue {
            field: "upstream.base_url",
            reason: e.to_string(),
        })?;
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "upstream.endpoint",
            }
            .into());
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "upstream.model",
            }
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upstream.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "chat".into()
}

fn default_model() -> String {
    "llama".into()
}

const fn default_timeout_secs() -> u64 {
    30
}

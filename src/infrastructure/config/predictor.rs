//! Prediction cycle configuration.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::TokenId;
use crate::error::{ConfigError, Result};

/// Prediction cycle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Token collection, in display order.
    #[serde(default = "default_tokens")]
    pub tokens: Vec<String>,

    /// Lower bound of the synthetic current price. Defaults to 100.
    #[serde(default = "default_price_min")]
    pub price_min: f64,

    /// Upper bound (exclusive) of the synthetic current price. Defaults to 1100.
    #[serde(default = "default_price_max")]
    pub price_max: f64,

    /// Total width of the fallback band as a fraction of the current price.
    ///
    /// `0.1` keeps fallback predictions within ±5%.
    #[serde(default = "default_fallback_spread")]
    pub fallback_spread: f64,

    /// Upper bound on a single upstream call, in seconds. Defaults to 30.
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Optional RNG seed for reproducible synthetic values.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            tokens: default_tokens(),
            price_min: default_price_min(),
            price_max: default_price_max(),
            fallback_spread: default_fallback_spread(),
            call_timeout_secs: default_call_timeout_secs(),
            seed: None,
        }
    }
}

impl PredictorConfig {
    /// Token collection as identifiers.
    #[must_use]
    pub fn token_ids(&self) -> Vec<TokenId> {
        self.tokens.iter().map(|t| TokenId::new(t.as_str())).collect()
    }

    /// Per-call timeout.
    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.tokens.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "predictor.tokens",
                reason: "must contain at least one token".to_string(),
            }
            .into());
        }
        let mut seen = HashSet::with_capacity(self.tokens.len());
        for token in &self.tokens {
            if token.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "predictor.tokens",
                    reason: "token identifiers cannot be blank".to_string(),
                }
                .into());
            }
            if !seen.insert(token.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "predictor.tokens",
                    reason: format!("duplicate token '{token}'"),
                }
                .into());
            }
        }

        if !self.price_min.is_finite() || self.price_min <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "predictor.price_min",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !self.price_max.is_finite() || self.price_max <= self.price_min {
            return Err(ConfigError::InvalidValue {
                field: "predictor.price_max",
                reason: "must be greater than price_min".to_string(),
            }
            .into());
        }
        if !(0.0..2.0).contains(&self.fallback_spread) {
            return Err(ConfigError::InvalidValue {
                field: "predictor.fallback_spread",
                reason: "must be in [0, 2)".to_string(),
            }
            .into());
        }
        if self.call_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "predictor.call_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn default_tokens() -> Vec<String> {
    ["aave", "uniswap", "compound-governance-token", "maker"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_price_min() -> f64 {
    100.0
}

const fn default_price_max() -> f64 {
    1100.0
}

const fn default_fallback_spread() -> f64 {
    0.1
}

const fn default_call_timeout_secs() -> u64 {
    30
}

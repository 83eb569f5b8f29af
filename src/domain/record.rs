//! Per-token record: current price, horizon predictions and sentiment.

use serde::Serialize;

use super::error::DomainError;
use super::horizon::{Horizon, Predictions};
use super::id::TokenId;
use super::sentiment::Sentiment;

/// Label of the first point in a [`TokenRecord::series`].
pub const SERIES_NOW_LABEL: &str = "Now";

/// Price data for one token produced by a prediction cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    #[serde(skip)]
    token: TokenId,
    current_price: f64,
    predictions: Predictions,
    sentiment: Sentiment,
}

/// One row of the detailed forecast for a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub horizon: Horizon,
    pub price: f64,
    /// Change relative to the current price, in percent.
    pub change_pct: f64,
}

impl TokenRecord {
    /// Assemble a record, checking the price invariant.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositivePrice`] if `current_price` is not a
    /// positive finite number.
    pub fn try_new(
        token: TokenId,
        current_price: f64,
        predictions: Predictions,
        sentiment: Sentiment,
    ) -> Result<Self, DomainError> {
        if !current_price.is_finite() || current_price <= 0.0 {
            return Err(DomainError::NonPositivePrice {
                price: current_price,
            });
        }
        Ok(Self {
            token,
            current_price,
            predictions,
            sentiment,
        })
    }

    #[must_use]
    pub fn token(&self) -> &TokenId {
        &self.token
    }

    #[must_use]
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    #[must_use]
    pub fn predictions(&self) -> &Predictions {
        &self.predictions
    }

    #[must_use]
    pub fn sentiment(&self) -> &Sentiment {
        &self.sentiment
    }

    /// Predicted price and percentage change for every horizon.
    pub fn forecast(&self) -> impl Iterator<Item = ForecastRow> + '_ {
        self.predictions.iter().map(|(horizon, price)| ForecastRow {
            horizon,
            price,
            change_pct: (price - self.current_price) / self.current_price * 100.0,
        })
    }

    /// Chart series: the current price followed by each prediction.
    #[must_use]
    pub fn series(&self) -> Vec<(&'static str, f64)> {
        std::iter::once((SERIES_NOW_LABEL, self.current_price))
            .chain(self.predictions.iter().map(|(h, p)| (h.short_label(), p)))
            .collect()
    }
}

//! Prediction cycle with degraded-mode fallback.
//!
//! For every token in the collection the [`Predictor`] synthesizes a current
//! price, asks the inference service for four horizon predictions and a
//! sentiment word, and assembles a [`TokenRecord`]. Tokens are processed one
//! at a time: both upstream calls for a token complete before the next
//! token's calls start, which keeps the request rate against the upstream
//! deterministic.
//!
//! Upstream failures of any kind (transport, status, malformed body,
//! unparseable answer, timeout) never leave this module. They are logged
//! and replaced with synthetic values:
//!
//! - predictions: `price * (1 + (r - 0.5) * spread)` per horizon
//! - sentiment: one of the three labels, uniformly
//!
//! Only a failure outside those policies, such as a record that violates a
//! domain invariant, aborts [`Predictor::run_cycle`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::prompt;
use crate::domain::{
    CycleId, DatasetBuilder, Horizon, Predictions, Sentiment, SentimentLabel, TokenDataset,
    TokenId, TokenRecord,
};
use crate::error::{Error, Result};
use crate::infrastructure::config::predictor::PredictorConfig;
use crate::port::outbound::llm::{ChatMessage, Llm};
use crate::port::outbound::random::RandomSource;

/// Numeric knobs of a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictorSettings {
    /// Lower bound of the synthetic current price.
    pub price_min: f64,
    /// Upper bound (exclusive) of the synthetic current price.
    pub price_max: f64,
    /// Width of the fallback band as a fraction of the current price.
    pub fallback_spread: f64,
    /// Upper bound on a single upstream call.
    pub call_timeout: Duration,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self::from(&PredictorConfig::default())
    }
}

impl From<&PredictorConfig> for PredictorSettings {
    fn from(config: &PredictorConfig) -> Self {
        Self {
            price_min: config.price_min,
            price_max: config.price_max,
            fallback_spread: config.fallback_spread,
            call_timeout: config.call_timeout(),
        }
    }
}

/// Builds token datasets from the inference service.
pub struct Predictor {
    llm: Arc<dyn Llm>,
    random: Arc<dyn RandomSource>,
    tokens: Vec<TokenId>,
    settings: PredictorSettings,
}

impl Predictor {
    #[must_use]
    pub fn new(
        llm: Arc<dyn Llm>,
        random: Arc<dyn RandomSource>,
        tokens: Vec<TokenId>,
        settings: PredictorSettings,
    ) -> Self {
        Self {
            llm,
            random,
            tokens,
            settings,
        }
    }

    /// Token collection, in processing order.
    #[must_use]
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    #[must_use]
    pub fn settings(&self) -> &PredictorSettings {
        &self.settings
    }

    /// Draw a synthetic current price in `[price_min, price_max)`.
    #[must_use]
    pub fn synthesize_current_price(&self) -> f64 {
        let PredictorSettings {
            price_min,
            price_max,
            ..
        } = self.settings;
        price_min + self.random.next_f64() * (price_max - price_min)
    }

    /// Ask for one prediction per horizon; synthesize them on any failure.
    pub async fn request_predictions(&self, current_price: f64, token: &TokenId) -> Predictions {
        let messages = prompt::prediction_messages(token, current_price);
        let outcome = self
            .call(&messages)
            .await
            .and_then(|content| Predictions::parse(&content).map_err(Error::from));

        match outcome {
            Ok(predictions) => {
                debug!(token = %token, ?predictions, "predictions received");
                predictions
            }
            Err(e) => {
                warn!(token = %token, error = %e, "prediction request failed, using fallback");
                self.fallback_predictions(current_price)
            }
        }
    }

    /// Ask for a sentiment label; pick one at random on any failure.
    pub async fn request_sentiment(&self, token: &TokenId) -> Sentiment {
        let messages = prompt::sentiment_messages(token);
        let outcome = self
            .call(&messages)
            .await
            .and_then(|content| Sentiment::parse(&content).map_err(Error::from));

        match outcome {
            Ok(sentiment) => {
                debug!(token = %token, sentiment = %sentiment, "sentiment received");
                sentiment
            }
            Err(e) => {
                warn!(token = %token, error = %e, "sentiment request failed, using fallback");
                self.fallback_sentiment()
            }
        }
    }

    /// Run one full cycle over the token collection.
    ///
    /// # Errors
    ///
    /// Returns an error only when a record cannot be assembled; upstream
    /// failures are absorbed by the fallback policies. No partial dataset is
    /// ever returned.
    pub async fn run_cycle(&self) -> Result<TokenDataset> {
        let cycle_id = CycleId::new();
        info!(
            cycle_id = %cycle_id,
            tokens = self.tokens.len(),
            provider = self.llm.name(),
            "prediction cycle started"
        );

        let mut builder = DatasetBuilder::new(cycle_id.clone(), self.tokens.len());
        for token in &self.tokens {
            let current_price = self.synthesize_current_price();
            let predictions = self.request_predictions(current_price, token).await;
            let sentiment = self.request_sentiment(token).await;

            let record = TokenRecord::try_new(token.clone(), current_price, predictions, sentiment)?;
            builder.insert(record)?;
        }

        let dataset = builder.finish();
        info!(cycle_id = %cycle_id, tokens = dataset.len(), "prediction cycle complete");
        Ok(dataset)
    }

    /// Synthetic predictions within ±`spread / 2` of `current_price`.
    #[must_use]
    pub fn fallback_predictions(&self, current_price: f64) -> Predictions {
        let spread = self.settings.fallback_spread;
        let mut values = [0.0; Horizon::COUNT];
        for value in &mut values {
            *value = current_price * (1.0 + (self.random.next_f64() - 0.5) * spread);
        }
        Predictions::new(values)
    }

    /// Uniformly chosen sentiment label.
    #[must_use]
    pub fn fallback_sentiment(&self) -> Sentiment {
        let index = self.random.next_index(SentimentLabel::ALL.len());
        Sentiment::from(SentimentLabel::ALL[index])
    }

    async fn call(&self, messages: &[ChatMessage]) -> Result<String> {
        let timeout = self.settings.call_timeout;
        tokio::time::timeout(timeout, self.llm.complete(messages))
            .await
            .map_err(|_| Error::Timeout(timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::llm::ScriptedLlm;
    use crate::testkit::random::SequenceRandom;

    fn predictor(llm: ScriptedLlm, draws: Vec<f64>, tokens: &[&str]) -> Predictor {
        Predictor::new(
            Arc::new(llm),
            Arc::new(SequenceRandom::new(draws)),
            tokens.iter().map(|t| TokenId::new(*t)).collect(),
            PredictorSettings::default(),
        )
    }

    #[test]
    fn synthesized_price_spans_configured_range() {
        let p = predictor(ScriptedLlm::new(), vec![0.0, 0.5, 0.999_999], &["aave"]);
        assert_eq!(p.synthesize_current_price(), 100.0);
        assert_eq!(p.synthesize_current_price(), 600.0);
        assert!(p.synthesize_current_price() < 1100.0);
    }

    #[tokio::test]
    async fn parses_upstream_predictions() {
        let llm = ScriptedLlm::new().reply("101, 102.5, 99, 110");
        let p = predictor(llm, vec![0.5], &["aave"]);

        let predictions = p.request_predictions(100.0, &TokenId::new("aave")).await;
        assert_eq!(predictions.values(), &[101.0, 102.5, 99.0, 110.0]);
    }

    #[tokio::test]
    async fn failed_prediction_request_uses_exact_fallback_values() {
        let llm = ScriptedLlm::new().fail("connection refused");
        let p = predictor(llm, vec![0.0, 0.25, 0.5, 0.75], &["aave"]);

        let predictions = p.request_predictions(200.0, &TokenId::new("aave")).await;
        // 200 * (1 + (r - 0.5) * 0.1)
        let expected = [190.0, 195.0, 200.0, 205.0];
        for (got, want) in predictions.values().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[tokio::test]
    async fn unparseable_predictions_fall_back() {
        let llm = ScriptedLlm::new().reply("I'm not able to predict prices.");
        let p = predictor(llm, vec![0.9], &["aave"]);

        let predictions = p.request_predictions(500.0, &TokenId::new("aave")).await;
        assert_eq!(predictions.len(), 4);
        for value in predictions.values() {
            assert!((*value - 520.0).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn upstream_sentiment_keeps_received_text() {
        let llm = ScriptedLlm::new().reply("  bullish\n");
        let p = predictor(llm, vec![0.0], &["aave"]);

        let sentiment = p.request_sentiment(&TokenId::new("aave")).await;
        assert_eq!(sentiment.as_str(), "bullish");
        assert_eq!(sentiment.label(), SentimentLabel::Bullish);
    }

    #[tokio::test]
    async fn failed_sentiment_picks_label_from_draw() {
        let llm = ScriptedLlm::new()
            .fail("boom")
            .reply("Very optimistic")
            .fail("boom");
        let p = predictor(llm, vec![0.1, 0.5, 0.9], &["aave"]);
        let token = TokenId::new("aave");

        assert_eq!(p.request_sentiment(&token).await.label(), SentimentLabel::Bearish);
        assert_eq!(p.request_sentiment(&token).await.label(), SentimentLabel::Neutral);
        assert_eq!(p.request_sentiment(&token).await.label(), SentimentLabel::Bullish);
    }

    #[tokio::test]
    async fn hung_call_times_out_and_falls_back() {
        let llm = ScriptedLlm::new().hang();
        let mut p = predictor(llm, vec![0.5], &["aave"]);
        p.settings.call_timeout = Duration::from_millis(20);

        let predictions = p.request_predictions(300.0, &TokenId::new("aave")).await;
        assert_eq!(predictions.values(), &[300.0; 4]);
    }

    #[tokio::test]
    async fn cycle_builds_record_per_token_in_order() {
        let llm = ScriptedLlm::new()
            .reply("1, 2, 3, 4")
            .reply("Bearish")
            .reply("5, 6, 7, 8")
            .reply("Neutral");
        let p = predictor(llm, vec![0.0, 0.5], &["aave", "maker"]);

        let dataset = p.run_cycle().await.unwrap();
        let tokens: Vec<&str> = dataset.tokens().map(TokenId::as_str).collect();
        assert_eq!(tokens, vec!["aave", "maker"]);

        let aave = dataset.get(&TokenId::new("aave")).unwrap();
        assert_eq!(aave.current_price(), 100.0);
        assert_eq!(aave.predictions().values(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(aave.sentiment().label(), SentimentLabel::Bearish);

        let maker = dataset.get(&TokenId::new("maker")).unwrap();
        assert_eq!(maker.current_price(), 600.0);
        assert_eq!(maker.sentiment().as_str(), "Neutral");
    }

    #[tokio::test]
    async fn non_finite_price_aborts_cycle() {
        let llm = ScriptedLlm::new().reply("1, 2, 3, 4").reply("Bullish");
        let p = predictor(llm, vec![f64::NAN], &["aave"]);

        let result = p.run_cycle().await;
        assert!(matches!(result, Err(Error::Domain(_))));
    }

    #[tokio::test]
    async fn duplicate_tokens_abort_cycle() {
        let llm = ScriptedLlm::new();
        let p = predictor(llm, vec![0.5], &["aave", "aave"]);

        assert!(p.run_cycle().await.is_err());
    }
}

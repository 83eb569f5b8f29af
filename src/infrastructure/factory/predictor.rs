//! Prediction cycle factory.

use std::sync::Arc;

use tracing::info;

use super::llm::build_llm_client;
use crate::adapter::outbound::random::StdRandom;
use crate::application::predictor::{Predictor, PredictorSettings};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::random::RandomSource;

/// Build a [`Predictor`] talking to the configured upstream.
///
/// # Errors
///
/// Returns an error if the inference client cannot be built.
pub fn build_predictor(config: &Config) -> Result<Predictor> {
    let llm = build_llm_client(config)?;
    Ok(build_predictor_with(config, llm))
}

/// Build a [`Predictor`] around an existing LLM client.
///
/// The random source is seeded from `predictor.seed` when set.
#[must_use]
pub fn build_predictor_with(config: &Config, llm: Arc<dyn Llm>) -> Predictor {
    let random: Arc<dyn RandomSource> = Arc::new(StdRandom::from_seed(config.predictor.seed));
    let tokens = config.predictor.token_ids();
    info!(
        tokens = tokens.len(),
        seeded = config.predictor.seed.is_some(),
        "predictor initialized"
    );
    Predictor::new(llm, random, tokens, PredictorSettings::from(&config.predictor))
}

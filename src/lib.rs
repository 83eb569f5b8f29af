//! Tokenpulse - token price dashboard backend.
//!
//! Two pieces make up the system:
//!
//! - **Gateway** - a reverse proxy that forwards `/api/llama/*` to the
//!   inference service under `/v1/*`, and serves the built dashboard with a
//!   fallback to its entry document.
//! - **Predictor** - for a fixed token collection, asks the inference
//!   service for horizon price predictions and a sentiment label per token,
//!   substituting synthetic values whenever a call fails.
//!
//! # Modules
//!
//! - [`domain`] - Token identifiers, horizons, sentiment, records, datasets
//! - [`port`] - Traits the application depends on (`Llm`, `RandomSource`)
//! - [`application`] - Prediction cycle, prompts, dashboard state machine
//! - [`adapter`] - Gateway, CLI, HTTP chat client, random source
//! - [`infrastructure`] - Configuration and component factories
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Scripted LLM and deterministic random source for tests
//!
//! # Example
//!
//! ```no_run
//! use tokenpulse::infrastructure::config::settings::Config;
//! use tokenpulse::infrastructure::factory::predictor::build_predictor;
//!
//! # async fn run() -> tokenpulse::error::Result<()> {
//! let config = Config::resolve(None)?;
//! let predictor = build_predictor(&config)?;
//! let dataset = predictor.run_cycle().await?;
//! println!("{} tokens", dataset.len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

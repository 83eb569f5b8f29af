//! Configuration sections and loading.
//!
//! - [`settings`] - Top-level [`Config`](settings::Config), file loading, env overrides
//! - [`gateway`] - Reverse proxy and static bundle
//! - [`upstream`] - Inference client
//! - [`predictor`] - Prediction cycle
//! - [`logging`] - Tracing subscriber

pub mod gateway;
pub mod logging;
pub mod predictor;
pub mod settings;
pub mod upstream;

//! Application layer: use cases written against the ports.
//!
//! - [`predictor`] - The prediction cycle and its fallback policies
//! - [`prompt`] - Chat messages for price and sentiment questions
//! - [`state`] - Consumer-owned cycle state machine

pub mod predictor;
pub mod prompt;
pub mod state;

pub use predictor::{Predictor, PredictorSettings};
pub use state::{CycleState, Dashboard};

//! Factory functions that wire configuration into ready-to-use components.
//!
//! - [`llm`] - Inference client construction
//! - [`predictor`] - Prediction cycle construction

pub mod llm;
pub mod predictor;

//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`llm`] - [`ScriptedLlm`](llm::ScriptedLlm): queued replies, failures and
//!   hangs with a start/finish call log.
//! - [`random`] - [`SequenceRandom`](random::SequenceRandom): replayable draws.

pub mod llm;
pub mod random;

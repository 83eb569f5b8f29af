//! Transport-agnostic domain types.
//!
//! - [`id`] - Token and cycle identifiers
//! - [`horizon`] - Forecast horizons and the four-value prediction vector
//! - [`sentiment`] - Closed sentiment label set
//! - [`record`] - Per-token record with its invariants
//! - [`dataset`] - The complete, immutable output of a cycle
//! - [`error`] - Invariant violations

pub mod dataset;
pub mod error;
pub mod horizon;
pub mod id;
pub mod record;
pub mod sentiment;

pub use dataset::{DatasetBuilder, TokenDataset};
pub use horizon::{Horizon, Predictions};
pub use id::{CycleId, TokenId};
pub use record::{ForecastRow, TokenRecord};
pub use sentiment::{Sentiment, SentimentLabel};

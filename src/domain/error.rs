//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and parsers when a
//! domain invariant would be violated.
//!
//! # Examples
//!
//! ```
//! use tokenpulse::domain::error::DomainError;
//! use tokenpulse::domain::{Predictions, Sentiment, TokenId, TokenRecord};
//!
//! let result = TokenRecord::try_new(
//!     TokenId::new("aave"),
//!     0.0,
//!     Predictions::new([1.0, 2.0, 3.0, 4.0]),
//!     Sentiment::parse("Bullish").unwrap(),
//! );
//!
//! assert!(matches!(result, Err(DomainError::NonPositivePrice { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Current price must be a positive, finite number.
    #[error("current price must be positive, got {price}")]
    NonPositivePrice {
        /// The invalid price that was provided.
        price: f64,
    },

    /// Every prediction must be a finite number.
    #[error("prediction segment '{segment}' is not a finite number")]
    NonFinitePrediction {
        /// The raw text that failed to parse.
        segment: String,
    },

    /// Exactly one value per horizon is required.
    #[error("expected {expected} predictions, got {actual}")]
    PredictionCount {
        /// Number of horizons.
        expected: usize,
        /// Number of values found.
        actual: usize,
    },

    /// Sentiment text did not match any known label.
    #[error("unknown sentiment '{text}'")]
    UnknownSentiment {
        /// The unrecognized text.
        text: String,
    },

    /// Token identifiers must be unique within a dataset.
    #[error("duplicate token '{token}'")]
    DuplicateToken {
        /// The repeated identifier.
        token: String,
    },

    /// Token is not part of the configured collection.
    #[error("unknown token '{token}'")]
    UnknownToken {
        /// The unrecognized identifier.
        token: String,
    },
}

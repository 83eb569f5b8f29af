//! Forecast horizons and the fixed-length prediction vector.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Time horizon of a single price prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    OneHour,
    SixHours,
    TwelveHours,
    TwentyFourHours,
}

impl Horizon {
    /// All horizons in prediction order.
    pub const ALL: [Horizon; 4] = [
        Horizon::OneHour,
        Horizon::SixHours,
        Horizon::TwelveHours,
        Horizon::TwentyFourHours,
    ];

    /// Number of horizons (and therefore of predictions per token).
    pub const COUNT: usize = Self::ALL.len();

    /// Length of the horizon in hours.
    #[must_use]
    pub const fn hours(self) -> u32 {
        match self {
            Self::OneHour => 1,
            Self::SixHours => 6,
            Self::TwelveHours => 12,
            Self::TwentyFourHours => 24,
        }
    }

    /// Short axis label, e.g. `6h`.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::SixHours => "6h",
            Self::TwelveHours => "12h",
            Self::TwentyFourHours => "24h",
        }
    }

    /// Long label, e.g. `6 hours`.
    #[must_use]
    pub const fn long_label(self) -> &'static str {
        match self {
            Self::OneHour => "1 hour",
            Self::SixHours => "6 hours",
            Self::TwelveHours => "12 hours",
            Self::TwentyFourHours => "24 hours",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

/// One predicted price per [`Horizon`], in horizon order.
///
/// Always exactly four values; serializes as a plain JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Predictions([f64; Horizon::COUNT]);

impl Predictions {
    /// Wrap four values, ordered 1h, 6h, 12h, 24h.
    #[must_use]
    pub const fn new(values: [f64; Horizon::COUNT]) -> Self {
        Self(values)
    }

    /// Parse a comma-separated model answer such as `"101.5, 102, $99.8, 105"`.
    ///
    /// Each segment is trimmed and may carry a leading `$`. The answer must
    /// contain exactly one finite number per horizon.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PredictionCount`] when the number of segments
    /// is wrong and [`DomainError::NonFinitePrediction`] when a segment is
    /// not a finite number.
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        let segments: Vec<&str> = content.trim().split(',').collect();
        if segments.len() != Horizon::COUNT {
            return Err(DomainError::PredictionCount {
                expected: Horizon::COUNT,
                actual: segments.len(),
            });
        }

        let mut values = [0.0; Horizon::COUNT];
        for (slot, segment) in values.iter_mut().zip(&segments) {
            let cleaned = segment.trim();
            let cleaned = cleaned.strip_prefix('$').unwrap_or(cleaned).trim();
            *slot = cleaned
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DomainError::NonFinitePrediction {
                    segment: (*segment).to_string(),
                })?;
        }

        Ok(Self(values))
    }

    /// Values in horizon order.
    #[must_use]
    pub const fn values(&self) -> &[f64; Horizon::COUNT] {
        &self.0
    }

    /// Prediction for a single horizon.
    #[must_use]
    pub fn at(&self, horizon: Horizon) -> f64 {
        self.0[horizon as usize]
    }

    /// Pair each horizon with its predicted value.
    pub fn iter(&self) -> impl Iterator<Item = (Horizon, f64)> + '_ {
        Horizon::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Number of predictions; always [`Horizon::COUNT`].
    #[must_use]
    pub const fn len(&self) -> usize {
        Horizon::COUNT
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizons_are_ordered_by_hours() {
        let hours: Vec<u32> = Horizon::ALL.iter().map(|h| h.hours()).collect();
        assert_eq!(hours, vec![1, 6, 12, 24]);
    }

    #[test]
    fn labels_match_dashboard_text() {
        assert_eq!(Horizon::TwelveHours.short_label(), "12h");
        assert_eq!(Horizon::OneHour.long_label(), "1 hour");
        assert_eq!(Horizon::TwentyFourHours.to_string(), "24h");
    }

    #[test]
    fn parses_plain_answer() {
        let p = Predictions::parse("101.5, 102,99.8 , 105").unwrap();
        assert_eq!(p.values(), &[101.5, 102.0, 99.8, 105.0]);
        assert_eq!(p.at(Horizon::SixHours), 102.0);
    }

    #[test]
    fn parses_dollar_prefixed_segments() {
        let p = Predictions::parse("$1.5, $2, 3, $ 4\n").unwrap();
        assert_eq!(p.values(), &[1.5, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert_eq!(
            Predictions::parse("1, 2, 3"),
            Err(DomainError::PredictionCount {
                expected: 4,
                actual: 3
            })
        );
        assert!(matches!(
            Predictions::parse("1, 2, 3, 4, 5"),
            Err(DomainError::PredictionCount { actual: 5, .. })
        ));
    }

    #[test]
    fn rejects_prose() {
        let err = Predictions::parse("I cannot predict prices, sorry, really, no").unwrap_err();
        assert!(matches!(err, DomainError::NonFinitePrediction { .. }));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(Predictions::parse("1, NaN, 3, 4").is_err());
        assert!(Predictions::parse("1, inf, 3, 4").is_err());
        assert!(Predictions::parse("").is_err());
    }

    #[test]
    fn iter_pairs_horizons_with_values() {
        let p = Predictions::new([1.0, 2.0, 3.0, 4.0]);
        let pairs: Vec<_> = p.iter().collect();
        assert_eq!(pairs[0], (Horizon::OneHour, 1.0));
        assert_eq!(pairs[3], (Horizon::TwentyFourHours, 4.0));
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_value(Predictions::new([1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(json, serde_json::json!([1.0, 2.0, 3.0, 4.0]));
    }
}

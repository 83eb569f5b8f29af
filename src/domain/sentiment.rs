//! Market sentiment labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Closed set of sentiment labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bearish,
    Neutral,
    Bullish,
}

impl SentimentLabel {
    /// All labels, in the order used for uniform fallback selection.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Bearish,
        SentimentLabel::Neutral,
        SentimentLabel::Bullish,
    ];

    /// Canonical capitalized name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
            Self::Bullish => "Bullish",
        }
    }

    /// Classify free text case-insensitively.
    ///
    /// Surrounding whitespace, quotes and trailing punctuation are ignored,
    /// so `" bullish."` classifies as [`SentimentLabel::Bullish`].
    #[must_use]
    pub fn classify(text: &str) -> Option<Self> {
        let word = text
            .trim()
            .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment as stored on a token record.
///
/// Keeps the text exactly as received (trimmed) alongside its
/// classification, so an upstream `"bullish"` is displayed as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Sentiment {
    label: SentimentLabel,
    text: String,
}

impl Sentiment {
    /// Classify received text, keeping its trimmed form.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownSentiment`] when the text is not one of
    /// the three labels.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.trim();
        let label =
            SentimentLabel::classify(trimmed).ok_or_else(|| DomainError::UnknownSentiment {
                text: trimmed.to_string(),
            })?;
        Ok(Self {
            label,
            text: trimmed.to_string(),
        })
    }

    /// Classified label.
    #[must_use]
    pub const fn label(&self) -> SentimentLabel {
        self.label
    }

    /// Text as received or generated.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<SentimentLabel> for Sentiment {
    fn from(label: SentimentLabel) -> Self {
        Self {
            label,
            text: label.as_str().to_string(),
        }
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.text
    }
}

impl TryFrom<String> for Sentiment {
    type Error = DomainError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(SentimentLabel::classify("BULLISH"), Some(SentimentLabel::Bullish));
        assert_eq!(SentimentLabel::classify("bearish"), Some(SentimentLabel::Bearish));
        assert_eq!(SentimentLabel::classify("Neutral"), Some(SentimentLabel::Neutral));
    }

    #[test]
    fn classify_ignores_punctuation_and_whitespace() {
        assert_eq!(SentimentLabel::classify("  Bullish.\n"), Some(SentimentLabel::Bullish));
        assert_eq!(SentimentLabel::classify("\"neutral\""), Some(SentimentLabel::Neutral));
    }

    #[test]
    fn classify_rejects_other_text() {
        assert_eq!(SentimentLabel::classify("Moderately bullish"), None);
        assert_eq!(SentimentLabel::classify(""), None);
    }

    #[test]
    fn parse_keeps_received_text() {
        let s = Sentiment::parse("  bullish \n").unwrap();
        assert_eq!(s.label(), SentimentLabel::Bullish);
        assert_eq!(s.as_str(), "bullish");
    }

    #[test]
    fn parse_rejects_unknown_text() {
        assert_eq!(
            Sentiment::parse(" to the moon "),
            Err(DomainError::UnknownSentiment {
                text: "to the moon".into()
            })
        );
    }

    #[test]
    fn from_label_uses_canonical_text() {
        let s = Sentiment::from(SentimentLabel::Bearish);
        assert_eq!(s.as_str(), "Bearish");
    }

    #[test]
    fn serializes_as_text() {
        let s = Sentiment::parse("neutral").unwrap();
        assert_eq!(serde_json::to_value(&s).unwrap(), serde_json::json!("neutral"));
        let back: Sentiment = serde_json::from_str("\"Bearish\"").unwrap();
        assert_eq!(back.label(), SentimentLabel::Bearish);
    }
}

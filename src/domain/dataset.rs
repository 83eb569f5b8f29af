//! Token dataset: the complete output of one prediction cycle.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::DomainError;
use super::id::{CycleId, TokenId};
use super::record::TokenRecord;

/// Immutable mapping from token to record, in collection order.
///
/// Only [`DatasetBuilder::finish`] creates one, so a dataset is always the
/// full result of a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDataset {
    cycle_id: CycleId,
    generated_at: DateTime<Utc>,
    records: Vec<TokenRecord>,
}

impl TokenDataset {
    /// Record for a token, if present.
    #[must_use]
    pub fn get(&self, token: &TokenId) -> Option<&TokenRecord> {
        self.records.iter().find(|r| r.token() == token)
    }

    /// Records in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &TokenRecord> {
        self.records.iter()
    }

    /// Tokens in collection order.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenId> {
        self.records.iter().map(TokenRecord::token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cycle that produced this dataset.
    #[must_use]
    pub fn cycle_id(&self) -> &CycleId {
        &self.cycle_id
    }

    /// When the cycle completed.
    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

impl Serialize for TokenDataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(record.token().as_str(), record)?;
        }
        map.end()
    }
}

/// Accumulates records for a cycle in progress.
#[derive(Debug)]
pub struct DatasetBuilder {
    cycle_id: CycleId,
    records: Vec<TokenRecord>,
}

impl DatasetBuilder {
    #[must_use]
    pub fn new(cycle_id: CycleId, capacity: usize) -> Self {
        Self {
            cycle_id,
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateToken`] if the token already has a record.
    pub fn insert(&mut self, record: TokenRecord) -> Result<(), DomainError> {
        if self.records.iter().any(|r| r.token() == record.token()) {
            return Err(DomainError::DuplicateToken {
                token: record.token().to_string(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Seal the dataset, stamping the completion time.
    #[must_use]
    pub fn finish(self) -> TokenDataset {
        TokenDataset {
            cycle_id: self.cycle_id,
            generated_at: Utc::now(),
            records: self.records,
        }
    }
}

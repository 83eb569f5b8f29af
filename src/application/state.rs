//! Consumer-side cycle state.
//!
//! The dashboard owns its state explicitly and only changes it through the
//! outcomes a cycle publishes:
//!
//! ```text
//! Idle ──begin──▶ Loading ──publish(Ok)──▶ Ready(dataset)
//!                    │
//!                    └──publish(Err)──▶ Failed(message)
//! ```
//!
//! `Ready` and `Failed` are terminal until the consumer explicitly starts a
//! new cycle. The last completed dataset stays visible through `Loading`
//! and `Failed`; it is only ever replaced by a newer complete one.

use std::sync::Arc;

use tracing::error;

use super::predictor::Predictor;
use crate::domain::error::DomainError;
use crate::domain::{TokenDataset, TokenId, TokenRecord};
use crate::error::{Error, Result};

/// Message shown when a cycle fails.
pub const FAILURE_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// State of the most recent cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleState {
    Idle,
    Loading {
        previous: Option<Arc<TokenDataset>>,
    },
    Ready(Arc<TokenDataset>),
    Failed {
        message: String,
        previous: Option<Arc<TokenDataset>>,
    },
}

impl CycleState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Ready(_) => "ready",
            Self::Failed { .. } => "failed",
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Latest complete dataset: the ready one, or the one from the last
    /// completed cycle while loading or after a failure.
    #[must_use]
    pub fn dataset(&self) -> Option<&Arc<TokenDataset>> {
        match self {
            Self::Idle => None,
            Self::Ready(dataset) => Some(dataset),
            Self::Loading { previous } | Self::Failed { previous, .. } => previous.as_ref(),
        }
    }
}

/// Dashboard state: the cycle state plus the selected token.
#[derive(Debug)]
pub struct Dashboard {
    tokens: Vec<TokenId>,
    selected: TokenId,
    state: CycleState,
}

impl Dashboard {
    /// Create an idle dashboard selecting the first token.
    ///
    /// # Errors
    ///
    /// Returns an error if `tokens` is empty.
    pub fn new(tokens: Vec<TokenId>) -> Result<Self> {
        let selected = tokens
            .first()
            .cloned()
            .ok_or_else(|| Error::State("dashboard needs at least one token".into()))?;
        Ok(Self {
            tokens,
            selected,
            state: CycleState::Idle,
        })
    }

    #[must_use]
    pub fn state(&self) -> &CycleState {
        &self.state
    }

    #[must_use]
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    #[must_use]
    pub fn selected(&self) -> &TokenId {
        &self.selected
    }

    /// Select a token from the collection.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownToken`] for tokens outside the collection.
    pub fn select(&mut self, token: &TokenId) -> Result<()> {
        if !self.tokens.contains(token) {
            return Err(DomainError::UnknownToken {
                token: token.to_string(),
            }
            .into());
        }
        self.selected = token.clone();
        Ok(())
    }

    /// Record of the selected token in the latest complete dataset.
    #[must_use]
    pub fn selected_record(&self) -> Option<&TokenRecord> {
        self.state.dataset()?.get(&self.selected)
    }

    /// Enter `Loading`, keeping the latest complete dataset visible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::State`] if a cycle is already loading.
    pub fn begin(&mut self) -> Result<()> {
        if self.state.is_loading() {
            return Err(Error::State("a cycle is already loading".into()));
        }
        let previous = self.state.dataset().cloned();
        self.state = CycleState::Loading { previous };
        Ok(())
    }

    /// Publish a cycle outcome, leaving `Loading`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::State`] if no cycle is loading.
    pub fn publish(&mut self, outcome: Result<TokenDataset>) -> Result<()> {
        if !self.state.is_loading() {
            return Err(Error::State(format!(
                "cannot publish while {}",
                self.state.name()
            )));
        }
        self.state = match outcome {
            Ok(dataset) => CycleState::Ready(Arc::new(dataset)),
            Err(e) => {
                error!(error = %e, "prediction cycle failed");
                CycleState::Failed {
                    message: FAILURE_MESSAGE.to_string(),
                    previous: self.state.dataset().cloned(),
                }
            }
        };
        Ok(())
    }

    /// Run a full cycle and publish its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::State`] if a cycle is already loading. A failed cycle
    /// is not an error here; it is reported through [`CycleState::Failed`].
    pub async fn refresh(&mut self, predictor: &Predictor) -> Result<&CycleState> {
        self.begin()?;
        let outcome = predictor.run_cycle().await;
        self.publish(outcome)?;
        Ok(&self.state)
    }
}

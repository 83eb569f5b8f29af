//! Mock [`Llm`] implementation for testing.
//!
//! [`ScriptedLlm`] answers calls from a queue of pre-loaded steps (reply,
//! fail, hang) and keeps a log of every call's start and finish so tests can
//! check ordering.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::outbound::llm::{ChatMessage, Llm, Role};

/// What a scripted call does.
#[derive(Debug, Clone)]
pub enum Step {
    /// Return this content.
    Reply(String),
    /// Fail with a connection error carrying this message.
    Fail(String),
    /// Never complete.
    Hang,
}

/// Phase of a logged call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Started,
    Finished,
}

/// One entry of the call log.
#[derive(Debug, Clone)]
pub struct CallEvent {
    /// Zero-based call number.
    pub call: usize,
    pub phase: Phase,
    /// Content of the last user message of the call.
    pub prompt: String,
}

/// Scripted LLM with a shared call log.
///
/// Each call pops the next [`Step`]; once the script is exhausted every call
/// behaves like the fallback step (a connection error unless changed with
/// [`otherwise`](Self::otherwise)).
pub struct ScriptedLlm {
    steps: Mutex<VecDeque<Step>>,
    otherwise: Step,
    latency: Duration,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    events: Arc<Mutex<Vec<CallEvent>>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            otherwise: Step::Fail("script exhausted".into()),
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful reply.
    #[must_use]
    pub fn reply(self, content: impl Into<String>) -> Self {
        self.steps.lock().push_back(Step::Reply(content.into()));
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.steps.lock().push_back(Step::Fail(message.into()));
        self
    }

    /// Queue a call that never completes.
    #[must_use]
    pub fn hang(self) -> Self {
        self.steps.lock().push_back(Step::Hang);
        self
    }

    /// Behaviour once the queue is empty.
    #[must_use]
    pub fn otherwise(mut self, step: Step) -> Self {
        self.otherwise = step;
        self
    }

    /// Sleep this long inside every call before answering.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Handle to the start/finish log, usable after the LLM is moved.
    #[must_use]
    pub fn events(&self) -> Arc<Mutex<Vec<CallEvent>>> {
        Arc::clone(&self.events)
    }

    /// Messages of every call so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().clone()
    }

    fn record(&self, call: usize, phase: Phase, prompt: &str) {
        self.events.lock().push(CallEvent {
            call,
            phase,
            prompt: prompt.to_string(),
        });
    }
}

impl Default for ScriptedLlm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let call = {
            let mut calls = self.calls.lock();
            calls.push(messages.to_vec());
            calls.len() - 1
        };
        let step = self
            .steps
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.otherwise.clone());

        self.record(call, Phase::Started, &prompt);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = match step {
            Step::Reply(content) => Ok(content),
            Step::Fail(message) => Err(Error::Connection(message)),
            Step::Hang => std::future::pending().await,
        };
        self.record(call, Phase::Finished, &prompt);
        result
    }
}

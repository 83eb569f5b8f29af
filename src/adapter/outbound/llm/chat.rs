//! Chat-completions client for the upstream inference service.
//!
//! Provides an implementation of the [`Llm`] trait that posts
//! `{model, messages}` and reads `choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::infrastructure::config::upstream::UpstreamConfig;
use crate::port::outbound::llm::{ChatMessage, Llm};

/// Environment variable holding an optional bearer key for the upstream.
pub const API_KEY_ENV: &str = "TOKENPULSE_API_KEY";

/// Chat-completions API client.
///
/// Talks to the inference service, normally through the gateway's
/// `/api/llama` prefix.
#[derive(Debug)]
pub struct ChatClient {
    /// HTTP client for API requests.
    client: Client,
    /// Full URL of the chat endpoint.
    url: Url,
    /// Model identifier sent with every request.
    model: String,
    /// Optional bearer key.
    api_key: Option<String>,
}

impl ChatClient {
    /// Create a client with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        endpoint: &str,
        model: impl Into<String>,
        timeout: Duration,
        api_key: Option<String>,
    ) -> Result<Self> {
        let url = Url::parse(&format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            model: model.into(),
            api_key,
        })
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is invalid.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        Self::new(
            config.base_url(),
            &config.endpoint,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
            config.api_key.clone(),
        )
    }

    /// Endpoint this client posts to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl Response {
    fn into_first_content(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Parse("response contains no choices".into()))
    }
}

#[async_trait]
impl Llm for ChatClient {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = Request {
            model: &self.model,
            messages,
        };

        let mut builder = self
            .client
            .post(self.url.clone())
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        let response = builder
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        debug!(url = %self.url, "chat completion received");
        response.into_first_content()
    }
}

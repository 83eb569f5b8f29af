//! Inference client factory.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::llm::ChatClient;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::llm::Llm;

/// Build the chat-completion client from configuration.
///
/// # Errors
///
/// Returns an error if the upstream URL is invalid or the HTTP client cannot
/// be built.
pub fn build_llm_client(config: &Config) -> Result<Arc<dyn Llm>> {
    let client = ChatClient::from_config(&config.upstream)?;
    info!(
        provider = client.name(),
        url = %client.url(),
        model = %config.upstream.model,
        authenticated = config.upstream.api_key.is_some(),
        "LLM client initialized"
    );
    Ok(Arc::new(client))
}

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::llm::chat::API_KEY_ENV;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate configuration without starting anything.
pub fn execute_config(config_path: Option<&Path>) -> Result<()> {
    let config = Config::resolve(config_path)?;

    output::section("Configuration Check");
    match config_path {
        Some(path) => output::field("Config", path.display()),
        None => output::field("Config", "defaults"),
    }
    output::success("Configuration is valid");

    output::section("Gateway");
    output::field("Listen", config.gateway.bind_addr()?);
    output::field(
        "Proxy",
        format!(
            "{} -> {}{}",
            config.gateway.prefix, config.gateway.upstream_origin, config.gateway.upstream_base
        ),
    );
    output::field("Static", config.gateway.static_dir.display());
    if config.gateway.index_path().is_file() {
        output::success("Entry document found");
    } else {
        output::warning(&format!(
            "Entry document {} not found; unmatched routes will return 404",
            config.gateway.index_path().display()
        ));
    }

    output::section("Predictor");
    output::field("Upstream", config.upstream.base_url());
    output::field("Model", &config.upstream.model);
    output::field("Tokens", config.predictor.tokens.join(", "));
    output::field(
        "Price range",
        format!("{} .. {}", config.predictor.price_min, config.predictor.price_max),
    );
    if config.upstream.api_key.is_some() {
        output::success("API key detected");
    } else {
        output::field("API key", format!("not set ({API_KEY_ENV})"));
    }

    output::success("Configuration check complete");
    Ok(())
}

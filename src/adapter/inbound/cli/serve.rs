//! Handler for `tokenpulse serve`.

use tracing::info;

use super::command::ServeArgs;
use crate::adapter::inbound::gateway;
use crate::error::Result;
use crate::infrastructure::config::logging::LogFormat;
use crate::infrastructure::config::settings::Config;

/// Load configuration and run the gateway until Ctrl+C.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let mut config = Config::resolve(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    config.init_logging();

    info!(version = env!("CARGO_PKG_VERSION"), "tokenpulse starting");
    gateway::serve(&config.gateway).await
}

/// Command-line flags win over the file and the environment.
fn apply_overrides(config: &mut Config, args: &ServeArgs) {
    if let Some(port) = args.port {
        config.gateway.port = port;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = LogFormat::Json;
    }
}

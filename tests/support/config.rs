use std::path::Path;

use tokenpulse::infrastructure::config::gateway::GatewayConfig;

/// Gateway bound to loopback, proxying to `origin`, serving `static_dir`.
pub fn gateway_config(origin: &str, static_dir: &Path) -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".into(),
        port: 0,
        upstream_origin: origin.to_string(),
        static_dir: static_dir.to_path_buf(),
        timeout_secs: 5,
        ..GatewayConfig::default()
    }
}

/// Static bundle with an entry document and one asset.
pub fn write_bundle(dir: &Path) {
    std::fs::write(dir.join("index.html"), "<!doctype html><div id=\"root\"></div>")
        .expect("write index");
    std::fs::write(dir.join("app.css"), "body { margin: 0 }").expect("write asset");
}

//! Gateway (reverse proxy + static bundle) configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, Result};

/// Gateway configuration.
///
/// Requests under [`prefix`](Self::prefix) are forwarded to
/// [`upstream_origin`](Self::upstream_origin) with the prefix rewritten to
/// [`upstream_base`](Self::upstream_base). Everything else is served from
/// [`static_dir`](Self::static_dir), falling back to [`index`](Self::index).
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Interface to bind. Defaults to `0.0.0.0`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port. Defaults to 3000; the `PORT` environment variable
    /// overrides the file.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix that is proxied. Defaults to `/api/llama`.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Origin (scheme, host, optional port) of the inference service.
    #[serde(default = "default_upstream_origin")]
    pub upstream_origin: String,

    /// Base path the prefix is rewritten to. Defaults to `/v1`.
    #[serde(default = "default_upstream_base")]
    pub upstream_base: String,

    /// Directory holding the built single-page application.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Entry document inside `static_dir`, served for unmatched routes.
    #[serde(default = "default_index")]
    pub index: String,

    /// Largest request body forwarded upstream, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Upper bound on a single forwarded exchange, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            prefix: default_prefix(),
            upstream_origin: default_upstream_origin(),
            upstream_base: default_upstream_base(),
            static_dir: default_static_dir(),
            index: default_index(),
            max_body_bytes: default_max_body_bytes(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    field: "gateway.host",
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// URL of the proxied prefix as seen from this host.
    ///
    /// Wildcard bind addresses are reached through loopback.
    #[must_use]
    pub fn local_url(&self) -> String {
        let host = match self.host.parse::<IpAddr>() {
            Ok(ip) if ip.is_unspecified() && ip.is_ipv6() => "[::1]".to_string(),
            Ok(ip) if ip.is_unspecified() => "127.0.0.1".to_string(),
            Ok(IpAddr::V6(ip)) => format!("[{ip}]"),
            _ => self.host.clone(),
        };
        format!("http://{host}:{}{}", self.port, self.prefix)
    }

    /// Path of the entry document.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if self.prefix.len() < 2 || !self.prefix.starts_with('/') || self.prefix.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "gateway.prefix",
                reason: "must start with '/', not end with '/', and not be the root".to_string(),
            }
            .into());
        }
        if !self.upstream_base.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "gateway.upstream_base",
                reason: "must start with '/'".to_string(),
            }
            .into());
        }

        let origin = Url::parse(&self.upstream_origin).map_err(|e| ConfigError::InvalidValue {
            field: "gateway.upstream_origin",
            reason: e.to_string(),
        })?;
        if !matches!(origin.scheme(), "http" | "https") || origin.host_str().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "gateway.upstream_origin",
                reason: "must be an http(s) origin".to_string(),
            }
            .into());
        }
        if origin.path() != "/" || origin.query().is_some() {
            return Err(ConfigError::InvalidValue {
                field: "gateway.upstream_origin",
                reason: "must not carry a path or query; use upstream_base".to_string(),
            }
            .into());
        }

        if self.index.is_empty() {
            return Err(ConfigError::MissingField {
                field: "gateway.index",
            }
            .into());
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gateway.max_body_bytes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gateway.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

const fn default_port() -> u16 {
    3000
}

fn default_prefix() -> String {
    "/api/llama".into()
}

fn default_upstream_origin() -> String {
    "https://llamatool.us.gaianet.network".into()
}

fn default_upstream_base() -> String {
    "/v1".into()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_index() -> String {
    "index.html".into()
}

const fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

const fn default_timeout_secs() -> u64 {
    120
}

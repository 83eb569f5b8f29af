//! Request forwarding to the upstream origin.
//!
//! Forwarding is transparent: method, headers and body go upstream as
//! received (minus hop-by-hop headers and `Host`, which is set from the
//! upstream URL), and the upstream status, headers and body come back
//! unchanged, error statuses included. Nothing is retried, cached or
//! rewritten. Only when no upstream response exists at all does the proxy
//! answer itself, with `502` or `504`.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::rewrite::RewriteRule;
use crate::error::Result;
use crate::infrastructure::config::gateway::GatewayConfig;

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Stateless forwarder shared by all requests.
#[derive(Debug, Clone)]
pub struct Proxy {
    client: Client,
    origin: Url,
    rule: RewriteRule,
    max_body_bytes: usize,
}

impl Proxy {
    /// Build a proxy from gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream origin is not a valid URL or the
    /// HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let origin = Url::parse(&config.upstream_origin)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            origin,
            rule: RewriteRule::new(config.prefix.as_str(), config.upstream_base.as_str()),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Whether requests for `path` are forwarded.
    #[must_use]
    pub fn handles(&self, path: &str) -> bool {
        self.rule.matches(path)
    }

    /// Upstream URL for a client-facing path-and-query.
    #[must_use]
    pub fn target_url(&self, path_and_query: &str) -> Option<Url> {
        let rewritten = self.rule.rewrite(path_and_query)?;
        self.origin.join(&rewritten).ok()
    }

    /// Forward one request and relay the upstream response.
    pub async fn forward(&self, request: Request) -> Response {
        let path_and_query = request
            .uri()
            .path_and_query()
            .map_or_else(|| request.uri().path().to_string(), |pq| pq.as_str().to_string());
        let Some(target) = self.target_url(&path_and_query) else {
            return (StatusCode::NOT_FOUND, "not a proxied path").into_response();
        };

        let (parts, body) = request.into_parts();
        let body = match axum::body::to_bytes(body, self.max_body_bytes).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(target = %target, error = %e, "request body rejected");
                return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
            }
        };

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);
        headers.remove(header::HOST);
        headers.remove(header::CONTENT_LENGTH);

        let method = parts.method;
        let started = Instant::now();
        let result = self
            .client
            .request(method.clone(), target.clone())
            .headers(headers)
            .body(body)
            .send()
            .await;

        match result {
            Ok(upstream) => {
                let status = upstream.status();
                debug!(
                    %method,
                    target = %target,
                    status = status.as_u16(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "forwarded"
                );
                let mut headers = upstream.headers().clone();
                strip_hop_by_hop(&mut headers);

                let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
                *response.status_mut() = status;
                *response.headers_mut() = headers;
                response
            }
            Err(e) if e.is_timeout() => {
                warn!(%method, target = %target, error = %e, "upstream timed out");
                (StatusCode::GATEWAY_TIMEOUT, "upstream timed out").into_response()
            }
            Err(e) => {
                warn!(%method, target = %target, error = %e, "upstream unreachable");
                (StatusCode::BAD_GATEWAY, "upstream unreachable").into_response()
            }
        }
    }
}

/// Remove hop-by-hop headers, including any named in `Connection`.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();
    for name in named.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

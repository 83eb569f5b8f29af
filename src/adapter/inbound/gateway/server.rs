//! HTTP front door: proxy routing, static bundle, listener.

use std::convert::Infallible;
use std::future::Future;

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::proxy::Proxy;
use crate::error::Result;
use crate::infrastructure::config::gateway::GatewayConfig;

/// State shared by every request.
#[derive(Clone)]
struct Gateway {
    proxy: Proxy,
    assets: ServeDir<ServeFile>,
}

/// Build the gateway router.
///
/// Paths under the configured prefix are forwarded upstream. Every other
/// path is looked up in the static directory; paths with no matching file
/// get the entry document with status 200 so client-side routing works on
/// deep links.
///
/// # Errors
///
/// Returns an error if the proxy cannot be built.
pub fn router(config: &GatewayConfig) -> Result<Router> {
    let proxy = Proxy::new(config)?;
    let assets = ServeDir::new(&config.static_dir).fallback(ServeFile::new(config.index_path()));

    Ok(Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(Gateway { proxy, assets }))
}

async fn dispatch(State(gateway): State<Gateway>, request: Request) -> Response {
    if gateway.proxy.handles(request.uri().path()) {
        return gateway.proxy.forward(request).await;
    }
    let served: std::result::Result<_, Infallible> = gateway.assets.oneshot(request).await;
    match served {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the router cannot be built or the server fails.
pub async fn serve_on<F>(listener: TcpListener, config: &GatewayConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(config)?;
    info!(
        addr = %listener.local_addr()?,
        prefix = %config.prefix,
        upstream = %config.upstream_origin,
        static_dir = %config.static_dir.display(),
        "gateway listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("gateway stopped");
    Ok(())
}

/// Bind the configured address and serve until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &GatewayConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr()?).await?;
    serve_on(listener, config, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
    })
    .await
}

//! HTTP layer: `/predict` and `/health` over axum, permissive CORS on every route.

mod error;
pub mod handlers;

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use passcheck_ai::ModelGateway;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ApiError;

/// Where and how to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Per-request trace spans.
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            debug: true,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Routes plus CORS, with the gateway as shared state.
pub fn router(gateway: ModelGateway) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .layer(CorsLayer::permissive())
        .with_state(gateway)
}

/// [`router`] with request tracing added in debug mode.
pub fn app(gateway: ModelGateway, debug: bool) -> Router {
    let app = router(gateway);
    if debug {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}

/// Bind `config.addr()` and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, gateway: ModelGateway) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("binding {}", config.addr()))?;
    serve_on(listener, app(gateway, config.debug), shutdown_signal()).await
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("http server")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c; shutting down");
    }
}

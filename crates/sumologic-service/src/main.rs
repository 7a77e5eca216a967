mod app;
mod config;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use sumo_api::{EventApi, EventRouterAdapter};
use sumo_model::SERVICE_NAME;
use sumo_observe::logger_init;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::{EnvConfig, ResourceSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = EnvConfig::from_env().context("failed to read configuration")?;
    logger_init(&cfg.logger).context("failed to initialize logger")?;

    match &cfg.resources {
        ResourceSource::Local(dir) => {
            info!(dir = %dir.display(), "reading resources from the local filesystem")
        }
        ResourceSource::ConfigurationService(url) => {
            info!(%url, "reading resources from the configuration service")
        }
    }
    info!(
        port = cfg.port,
        path = %cfg.path,
        endpoint = %cfg.sumo.endpoint,
        broker = %cfg.event_broker,
        delay_secs = cfg.consistency_delay.as_secs(),
        "starting {SERVICE_NAME}"
    );

    let router = Arc::new(app::build_router(&cfg));
    let api = EventApi::new(Arc::new(EventRouterAdapter::new(router)), cfg.path.clone()).router();

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    sumo_api::axum::serve(listener, api)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("http server failed")?;

    info!("shutdown complete");
    Ok(())
}

/// Cancel `token` on SIGINT or SIGTERM.
async fn watch_signals(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM, waiting for ctrl-c only");
                ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    ctrl_c().await;

    info!("shutdown signal received");
    token.cancel();
}

async fn ctrl_c() {
    wait_for(tokio::signal::ctrl_c(), "ctrl-c").await
}

/// Resolve once `signal` fires; never resolve when its handler cannot be installed.
async fn wait_for<F>(signal: F, name: &str)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, signal = name, "cannot listen for signal, shutdown by it is disabled");
        std::future::pending::<()>().await;
    }
}

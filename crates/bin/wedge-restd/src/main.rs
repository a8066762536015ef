//! # wedge-restd: wedge REST daemon
//!
//! Composition root that wires the platform into the router and starts the
//! listener.
//!
//! ## Responsibilities
//! - Load configuration (`rest.toml`, env vars)
//! - Install the console and rotating file log sinks
//! - Construct the platform adapter and the system service
//! - Build the axum router, injecting the service
//! - Load TLS material, bind the listener and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;
mod logging;
mod transport;

use anyhow::Context;
use wedge_adapter_http_axum::router;
use wedge_adapter_http_axum::state::AppState;
use wedge_adapter_virtual::VirtualPlatform;
use wedge_app::catalog::Catalog;
use wedge_app::services::system_service::SystemService;

use config::Config;
use transport::Transport;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let _guard = logging::init(&config.logging).context("failed to initialise logging")?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = config.listen.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.build().context("failed to start runtime")?;

    let result = runtime.block_on(run(config));
    if let Err(err) = &result {
        tracing::error!("wedge-restd stopped: {err:#}");
    }
    result
}

async fn run(config: Config) -> anyhow::Result<()> {
    let catalog = Catalog::standard().context("invalid resource catalog")?;
    let platform = VirtualPlatform::new(config.platform.clone());
    let state = AppState::new(SystemService::new(catalog, platform));
    let app = router::build(state);

    let addr = config.bind_addr()?;
    let tls = config.tls_files();
    let transport = Transport::prepare(addr, tls.as_ref()).await?;

    let scheme = if transport.is_tls() { "https" } else { "http" };
    tracing::info!(addr = %transport.local_addr()?, scheme, "wedge-restd listening");

    transport.serve(app, shutdown_signal()).await?;
    tracing::info!("wedge-restd shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

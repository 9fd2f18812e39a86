mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use margin_core::Sharer;
use margin_gateway::{App, AppState, GatewayConfig};
use margin_generator::RandomGenerator;
use margin_service::{ShareService, ShareSettings};
use margin_storage::{InMemoryShareStore, RedisShareStore, RedisStoreSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    margin_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        frontend_url = %config.frontend_url,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    let settings = ShareSettings::builder()
        .frontend_url(config.frontend_url.clone())
        .max_attempts(config.max_attempts)
        .build();

    let sharer: Arc<dyn Sharer> = match config.storage {
        StorageBackendArg::InMemory => {
            let store = InMemoryShareStore::new();
            // Runs for the lifetime of the runtime.
            let _ = store.spawn_sweeper(Duration::from_secs(config.sweep_interval_secs.max(1)));
            Arc::new(ShareService::new(store, RandomGenerator::new(), settings))
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            let store_settings = RedisStoreSettings::builder()
                .op_timeout(Duration::from_millis(config.redis_timeout_ms))
                .build();
            let store = RedisShareStore::connect(redis_url, store_settings)
                .await
                .context("failed to connect to Redis")?;
            Arc::new(ShareService::new(store, RandomGenerator::new(), settings))
        }
    };

    let gateway_config = GatewayConfig::builder()
        .frontend_url(config.frontend_url)
        .max_body_bytes(config.max_body_bytes)
        .build();
    let app = App::router(AppState::new(sharer), &gateway_config);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

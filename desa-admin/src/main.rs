//! desa-admin - village administration service
//!
//! Serves the JSON API for residents, family cards, change requests, social
//! aid, announcements, UMKM, administrative documents and village info,
//! backed by a single SQLite key-value table.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use desa_common::config::{BootstrapConfig, ConfigOverrides};
use desa_common::db::init_database;
use desa_common::seed::seed_if_missing;
use desa_common::store::{SqliteStore, Store};
use desa_common::time::millis_to_duration;
use desa_common::DesaService;
use desa_admin::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for desa-admin
#[derive(Parser, Debug)]
#[command(name = "desa-admin")]
#[command(about = "Village administration service")]
#[command(version)]
struct Args {
    /// Bootstrap TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root folder holding desa.db
    #[arg(short, long, env = "DESA_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "DESA_PORT")]
    port: Option<u16>,

    /// Artificial store latency in milliseconds (0 disables it)
    #[arg(long)]
    latency_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = BootstrapConfig::resolve(ConfigOverrides {
        config_file: args.config,
        root_folder: args.root_folder,
        port: args.port,
        store_latency_ms: args.latency_ms,
    })
    .context("Failed to resolve configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "desa_admin={level},desa_common={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting desa-admin v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Root folder: {}", config.root_folder.display());
    info!("Database path: {}", config.database_path.display());

    let pool = match init_database(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let store = Store::new(Arc::new(SqliteStore::new(pool)))
        .with_latency(millis_to_duration(config.store_latency_ms));
    let seeded = seed_if_missing(&store)
        .await
        .context("Failed to seed initial data")?;
    if seeded > 0 {
        info!("Fresh database: seeded {} collections", seeded);
    }

    let app = build_router(AppState::new(DesaService::new(store)));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("desa-admin listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

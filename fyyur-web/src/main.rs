//! Fyyur (fyyur-web) - Main entry point
//!
//! Venue/artist/show listing service: loads configuration, opens the
//! database, and serves the HTML pages over HTTP.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fyyur_common::config::{self, CliOverrides, LoggingConfig, ServiceConfig, TomlConfig};
use fyyur_common::db::init_database;
use fyyur_web::{build_router, seed, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for fyyur-web
#[derive(Parser, Debug)]
#[command(name = "fyyur-web")]
#[command(about = "Venue, artist and show listings")]
#[command(version)]
struct Args {
    /// TOML config file (also FYYUR_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file (also FYYUR_DATABASE)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Address to bind (also FYYUR_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (also PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Populate demo venues, artists and shows when the database is empty
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Configuration comes first: it decides where logs go
    let toml_config = match config::locate_config_file(args.config.as_deref())? {
        Some(path) => config::load_toml_config(&path)?,
        None => TomlConfig::default(),
    };
    let cli = CliOverrides {
        database: args.database.clone(),
        host: args.host.clone(),
        port: args.port,
    };
    let service_config = ServiceConfig::resolve(&cli, toml_config)?;

    init_tracing(&service_config.logging)?;

    info!(
        "Starting Fyyur (fyyur-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Database: {}", service_config.database_path.display());

    let db_pool = init_database(&service_config.database_path)
        .await
        .context("Failed to initialize database")?;

    if args.seed_demo {
        seed::seed_if_empty(&db_pool)
            .await
            .context("Failed to seed demo data")?;
    }

    let app = build_router(AppState::new(db_pool));

    let addr = service_config.bind_address();
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// RUST_LOG wins; otherwise the configured level plus request tracing
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("{},tower_http=info", logging.level))
            .with_context(|| format!("Invalid logging level {:?}", logging.level))?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .init();
        }
        None => registry.with(fmt::layer()).init(),
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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

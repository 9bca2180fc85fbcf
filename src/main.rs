use std::path::PathBuf;
use std::sync::Arc;

use bookshelf::config::{Cli, Config, default_config_dir, default_config_path};
use bookshelf::db::Database;
use bookshelf::handler::AppState;
use bookshelf::routes;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("bookshelf.svc starting");

    // The database file lives next to the config file. Without --config the
    // default directory is used, and a missing default config means defaults.
    let (cfg, data_dir) = match args.config_path {
        Some(path) => {
            let path = PathBuf::from(path);
            let dir = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            let cfg = Config::new(&path.to_string_lossy()).unwrap_or_else(|e| {
                tracing::error!(error = %e, path = ?path, "failed to load config file");
                std::process::exit(1);
            });
            (cfg, dir)
        }
        None => {
            let path = default_config_path();
            let cfg = if path.exists() {
                Config::new(&path.to_string_lossy()).unwrap_or_else(|e| {
                    tracing::error!(error = %e, path = ?path, "failed to load config file");
                    std::process::exit(1);
                })
            } else {
                tracing::info!(path = ?path, "no config file found, using defaults");
                Config::default()
            };
            (cfg, default_config_dir())
        }
    };

    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(error = %e, dir = ?data_dir, "failed to create data directory");
        std::process::exit(1);
    }

    let db = Arc::new(Database::new(&cfg, &data_dir).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup database");
        std::process::exit(1);
    }));

    let address = cfg.app.address();
    let app = routes::app(AppState { db });

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("bookshelf.svc running on {}", &address);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server stopped unexpectedly");
        std::process::exit(1);
    }

    tracing::info!("bookshelf.svc going off, graceful shutdown complete");
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
    tracing::info!("ctrl+c signal received, preparing to shutdown");
}

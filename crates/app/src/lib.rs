#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;

use std::sync::Arc;

use quest_core::model::QuestCatalog;
use services::{AppServices, Clock};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

pub use config::{Config, ConfigError};
pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;

/// Open storage, bind the listener and serve until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns configuration, storage and listener failures.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = config.sqlite_url()?;
    let key = config.cookie_key()?;
    let clock = Clock::default_clock();

    info!(db = %db_url, "opening database");
    let services =
        AppServices::new_sqlite(&db_url, clock, Arc::new(QuestCatalog::builtin())).await?;
    let state = AppState::new(services, key, clock);

    let listener = TcpListener::bind(config.bind).await?;
    info!(address = %config.bind, "server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(err) => {
                error!(%err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                error!(%err, "failed to install SIGTERM handler");
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
}

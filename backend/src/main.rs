use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_server::app;
use todo_server::config::Config;
use todo_server::store::{open_store, DATABASE_NAME};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            error!(%error, "Configuration error");
            std::process::exit(1);
        }
    };
    info!(store_mode = ?config.store_mode, "Configuration loaded");

    let store = match open_store(&config).await {
        Ok(store) => store,
        Err(error) => {
            error!(
                %error,
                "Document store connection error. Please make sure the store is running."
            );
            std::process::exit(1);
        }
    };
    info!("Connected to `{DATABASE_NAME}`!");

    let address = config.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(error) => {
            error!(%error, "Failed to bind to {address}");
            std::process::exit(1);
        }
    };
    info!("Server running on http://{address}");

    if let Err(error) = axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(%error, "Server error");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

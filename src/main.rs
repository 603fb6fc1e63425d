//! Roster - Student Records Service
//!
//! Loads configuration, builds the one store handle, and serves the API
//! until Ctrl+C or SIGTERM.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;

use roster::storage::{seed_if_empty, MemoryStore, StudentStore};
use roster::{router, AppState, Config, APP_VERSION};

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .init();

    tracing::info!("Roster v{}", APP_VERSION);

    let store = open_store(&config).await?;

    if config.seed {
        seed_if_empty(store.as_ref()).await?;
    }

    let app = router(AppState::new(store));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server is running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

// =============================================================================
// Store
// =============================================================================

#[cfg(feature = "postgres")]
async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn StudentStore>> {
    match config.database_url() {
        Some(url) => {
            tracing::info!("Connecting to PostgreSQL");
            let store = roster::PostgresStore::connect(url).await?;
            tracing::info!("PostgreSQL connected");
            Ok(Arc::new(store))
        }
        None => Ok(memory_store()),
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn StudentStore>> {
    match config.database_url() {
        Some(_) => anyhow::bail!("DATABASE_URL is set but this build has no postgres support"),
        None => Ok(memory_store()),
    }
}

fn memory_store() -> Arc<dyn StudentStore> {
    tracing::warn!("DATABASE_URL not set, records will live in memory only");
    Arc::new(MemoryStore::new())
}

// =============================================================================
// Shutdown
// =============================================================================

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

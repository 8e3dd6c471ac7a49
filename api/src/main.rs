use std::sync::Arc;

use api::AppState;
use api::config::{Config, StoreBackend};
use food_store::store::memory::{MemoryListingStore, MemoryRequestStore};
use food_store::store::postgres::{self, PgListingStore, PgRequestStore};
use food_store::{ListingStore, RequestStore};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Stores = (Arc<dyn ListingStore>, Arc<dyn RequestStore>);

async fn db_connect(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, Box<dyn std::error::Error>> {
    let db = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    postgres::migrate(&db).await?;

    Ok(db)
}

async fn build_stores(backend: &StoreBackend) -> Result<Stores, Box<dyn std::error::Error>> {
    match backend {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let db = db_connect(database_url, *max_connections).await?;
            tracing::info!("connected to postgres");

            let listings: Arc<dyn ListingStore> = Arc::new(PgListingStore::new(db.clone()));
            let requests: Arc<dyn RequestStore> = Arc::new(PgRequestStore::new(db));
            Ok((listings, requests))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory stores, data is lost on shutdown");

            let listings: Arc<dyn ListingStore> = Arc::new(MemoryListingStore::new());
            let requests: Arc<dyn RequestStore> = Arc::new(MemoryRequestStore::new());
            Ok((listings, requests))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let (listings, requests) = build_stores(&config.store_backend).await?;
    let state = AppState::new(&config, listings, requests);
    let app = api::app(&config, state);

    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!("food is running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!("failed to install terminate handler: {err}");
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
}

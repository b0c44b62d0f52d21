//! CTF Arena - Application Entry Point

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ctfarena::{
    config::Config,
    create_app, db,
    services::BadgeCatalog,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.server.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting CTF Arena server...");

    tracing::info!(kind = ?config.database.kind, "Connecting to database...");
    let store = db::connect(&config.database).await?;

    let catalog = BadgeCatalog::load(store.as_ref()).await?;
    if catalog.is_empty() {
        tracing::warn!("Badge catalog is empty, no badges will be awarded");
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(store, catalog, config);

    let app = create_app(state);

    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

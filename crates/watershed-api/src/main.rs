//! Watershed API server entry point.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use watershed_api::config::ApiConfig;
use watershed_api::error::AppError;
use watershed_api::state::AppState;
use watershed_content::ContentCatalog;
use watershed_content::application::ingest::{load_builtin_catalog, load_catalog_from_path};
use watershed_core::clock::SystemClock;

fn load_catalog(config: &ApiConfig) -> Result<ContentCatalog, AppError> {
    let catalog = match &config.content_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading content catalog from file");
            load_catalog_from_path(path)?
        }
        None => load_builtin_catalog()?,
    };
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting watershed API server");

    let config = ApiConfig::from_env()?;
    let addr = config.socket_addr()?;

    let catalog = Arc::new(load_catalog(&config)?);
    tracing::info!(
        version_hash = %catalog.version_hash(),
        roles = catalog.roles().len(),
        strategies = catalog.strategies().len(),
        "content catalog ready"
    );

    let app_state = AppState::new(Arc::new(SystemClock), catalog);
    app_state.install_session()?;
    let app = watershed_api::build_router(app_state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export all model types
pub use model::*;

// Export store types
pub use store::{Catalog, DirStorage, FailoverStorage, Storage, StoreError};

use api::handlers::{AppState, CatalogState};
use config::AppConfig;
use std::sync::Arc;

/// Build shared state from configuration: failover storage over the data and fallback directories
pub fn build_state(config: &AppConfig) -> AppState<FailoverStorage> {
    let storage = FailoverStorage::new(&config.storage.data_dir, &config.storage.fallback_dir);
    let catalog = Catalog::new(storage, config.storage.cache_ttl());

    let admin_secret = config.admin_secret();
    if admin_secret.is_none() {
        log::error!("ADMIN_SECRET is not set. Admin API will reject all requests.");
    }

    Arc::new(CatalogState::new(catalog, admin_secret))
}

/// Serve the catalog API until the listener fails
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    let app = routes::create_router().with_state(build_state(config));

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Catalog API listening on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}

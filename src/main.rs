use artist_catalog::config::AppConfig;
use artist_catalog::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Default to Info, overridable through RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={} data_dir={} fallback_dir={} cache_ttl={}ms",
        config.server_address(),
        config.storage.data_dir.display(),
        config.storage.fallback_dir.display(),
        config.storage.cache_ttl_ms
    );

    run_server(&config).await
}

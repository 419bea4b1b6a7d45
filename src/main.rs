use tracing::info;
use tracing_subscriber::EnvFilter;

use monitor_feed::server;
use monitor_feed::{Config, DataService};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("monitor_feed=info,tower_http=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting monitor feed...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    let enabled: Vec<&str> = config.enabled.iter().map(|key| key.as_str()).collect();
    info!("Enabled sources: {}", enabled.join(", "));

    let service = DataService::from_config(&config)?;
    info!(
        "Data service initialized (timeout {}ms, {} concurrent requests)",
        config.request_timeout.as_millis(),
        config.max_concurrent_requests
    );

    if config.warm_on_start {
        service.refresh_all().await;
    }

    server::serve(service, config.bind_addr).await?;

    info!("Monitor feed stopped");
    Ok(())
}

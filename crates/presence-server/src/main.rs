//! WebSocket server for collaborative cursor presence.

use anyhow::Result;
use presence_server::config::Config;
use presence_server::server;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // RUST_LOG wins over the PRESENCE_DEBUG toggle.
    let default_directive = if config.debug {
        "presence_server=debug,tower_http=debug,info"
    } else {
        "presence_server=info,warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    info!(
        "Starting presence-server on {}:{} (max_clients = {})",
        config.bind_addr, config.port, config.max_clients
    );

    server::run(config).await
}

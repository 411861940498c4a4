//! Pulldown Explorer Web Server
//!
//! Run with: cargo run -p pulldown-web

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pulldown_web::config::{Config, CONFIG_ENV};
use pulldown_web::router::build_router;
use pulldown_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &config.source {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => warn!("No config file found (set {}); using defaults", CONFIG_ENV),
    }

    info!("Starting pulldown explorer...");

    let addr = config.bind_address();
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod error;
mod rest;
mod validation;

use config::ServerConfig;
use db::DbConnection;
use domain::ExpenseService;
use rest::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::connect_lazy(&config.database_url)?;

    // A store that is down at startup is not fatal; requests fail individually until it is back
    if let Err(e) = db.ensure_schema().await {
        error!("Failed to connect to database: {}", e);
    }

    let state = AppState::new(ExpenseService::new(db));
    let app = rest::create_router(state, config.cors_origin.clone());

    info!("Starting server on {}", config.bind_addr);
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

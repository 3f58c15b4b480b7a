//! data-server: serves the data-api record collection over HTTP.
//!
//! Run from repo root: `cargo run -p data-server`
//! Configuration comes from the environment (and `.env`); see `AppConfig::from_env`.

use data_api::{app, AppConfig, AppState, StoreBackend};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("data_api=info,data_server=info,tower_http=info")
            }),
        )
        .init();

    let config = AppConfig::from_env()?;
    match &config.store {
        StoreBackend::Memory { seed_path } => {
            tracing::info!(seed = ?seed_path, "using in-memory store")
        }
        StoreBackend::Postgres { schema, .. } => {
            tracing::info!(schema = %schema, "using postgres store")
        }
    }
    let state = AppState::from_backend(&config.store).await?;
    let router = app(state, config.max_body_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

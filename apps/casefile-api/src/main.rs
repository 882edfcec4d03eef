use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use casefile_api::{app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("casefile_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing Casefile API...");
    let state = AppState::new().await?;
    let state = Arc::new(state);

    let app = app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3005);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting Casefile API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

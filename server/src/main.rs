//! Champions API server.
//!
//! Run from repo root: `cargo run -p champions-server`
//! Configuration comes from the environment or a `.env` file (see `AppConfig`).

use champions_api::{app, connect, AppConfig, AppState};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("champions_api=info,champions_server=info,tower_http=info")
            }),
        )
        .init();

    let pool = connect(&config).await?;
    let state = AppState::from_pool(pool, &config);
    let app = app(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        base_path = %config.base_path,
        "champions API listening on http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

//! QR label service entry point.
//!
//! Serves the generator page and the label rendering API over HTTP.

use tracing_subscriber::EnvFilter;

mod config;
mod handlers;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config::ServerConfig::load();
    let addr = format!("0.0.0.0:{}", config.port);
    let app = routes::create_router(config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("QR label server listening on http://{addr}");

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

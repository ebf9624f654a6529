use std::sync::Arc;

use portfolio::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(api_url = %config.api_url, "Using backend API");

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config)?);
    let app = routes::router(state);

    tracing::info!("Portfolio listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use shopbot_backend::{config::AppConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shopbot_backend=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let addr = config.bind_addr();
    tracing::info!(store = ?config.store, tokens = config.api_tokens.len(), "configuration loaded");

    let state = Arc::new(AppState::from_config(config).await.context("opening chat history store")?);

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("shopbot chat backend running at http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

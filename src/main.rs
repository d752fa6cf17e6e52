use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use game_match_api::{
    catalog::load_catalog,
    config::Config,
    routes::{create_router, AppState},
    services::FriendliClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("game_match_api=info,tower_http=info")),
        )
        .with(fmt::layer())
        .init();

    let config = Config::from_env()?;

    // No catalog, no service
    let catalog = load_catalog(&config.catalog_path)
        .with_context(|| format!("failed to load catalog from {}", config.catalog_path))?;

    let generator = FriendliClient::from_config(&config)
        .context("failed to build text-generation client")?;

    let state = AppState::new(catalog, Arc::new(generator)).with_rng_seed(config.match_rng_seed);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    tracing::info!(
        address = %address,
        model = %config.friendli_model,
        seeded = config.match_rng_seed.is_some(),
        "Server running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}

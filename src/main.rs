use anyhow::{Context, Result};
use icu_translate_bot::config::Config;
use icu_translate_bot::security;
use icu_translate_bot::server::{self, AppState};
use icu_translate_bot::store::SqliteStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("icu_translate_bot=info".parse()?),
        )
        .init();

    info!("Starting ICU translate bot");

    let config = Config::from_env()?;

    let public_key = security::parse_public_key(&config.discord_public_key)
        .context("DISCORD_PUBLIC_KEY is not a valid ed25519 public key")?;

    let store = Arc::new(
        SqliteStore::connect(&config.database_url)
            .await
            .context("Failed to open job store")?,
    );
    info!("✓ Job store ready");

    let state = AppState::new(
        config.discord_application_id.clone(),
        public_key,
        store.clone(),
        reqwest::Client::new(),
    );

    server::serve(config.port, state).await?;

    store.close().await;
    info!("Shutdown complete");
    Ok(())
}

//! Register the application's slash commands with Discord.
//!
//! Usage:
//!   cargo run --bin register-commands
//!
//! Required environment variables:
//! - DISCORD_APPLICATION_ID
//! - DISCORD_PUBLIC_KEY
//! - DISCORD_TOKEN
//!
//! Optional:
//! - DISCORD_API_URL (defaults to https://discord.com/api/v10)

use anyhow::{Context, Result};
use icu_translate_bot::commands;
use icu_translate_bot::config::Config;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("icu_translate_bot=info".parse()?)
                .add_directive("register_commands=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let token = config
        .discord_token
        .as_deref()
        .context("DISCORD_TOKEN not set")?;

    let registered = commands::register_commands(
        &config.discord_api_url,
        &config.discord_application_id,
        token,
    )
    .await?;

    info!("✓ Registered {} command(s)", registered);
    Ok(())
}

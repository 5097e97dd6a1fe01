use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Discord
    pub discord_application_id: String,
    pub discord_public_key: String,
    pub discord_token: Option<String>,
    pub discord_api_url: String,

    // Storage
    pub database_url: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Discord - application id and hex-encoded ed25519 public key
            discord_application_id: std::env::var("DISCORD_APPLICATION_ID")
                .context("DISCORD_APPLICATION_ID not set")?,
            discord_public_key: std::env::var("DISCORD_PUBLIC_KEY")
                .context("DISCORD_PUBLIC_KEY not set")?,
            // Only needed to register commands, never to serve interactions
            discord_token: std::env::var("DISCORD_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),
            discord_api_url: std::env::var("DISCORD_API_URL")
                .unwrap_or_else(|_| "https://discord.com/api/v10".to_string()),

            // Storage
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://jobs.db".to_string()),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

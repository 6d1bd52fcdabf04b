use anyhow::{Context, Result};

/// Application configuration loaded from environment variables, read once at
/// process start.
///
/// `DATABASE_URL` is optional: without it the service runs in anonymous mode
/// with the file-backed draft store only.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub database_url: Option<String>,
    pub local_store_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            database_url: std::env::var("DATABASE_URL").ok(),
            local_store_path: std::env::var("LOCAL_STORE_PATH")
                .unwrap_or_else(|_| "data/local_store.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

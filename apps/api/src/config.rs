use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the serialized TF-IDF vectorizer artifact (JSON).
    pub vectorizer_path: String,
    /// Path to the posting catalog CSV.
    pub catalog_path: String,
    /// Path to the flat-file visit counter.
    pub visits_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            vectorizer_path: require_env("VECTORIZER_PATH")?,
            catalog_path: require_env("CATALOG_PATH")?,
            visits_path: std::env::var("VISITS_PATH").unwrap_or_else(|_| "visits.txt".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

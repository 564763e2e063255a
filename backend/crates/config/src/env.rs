use hunter_common::error::{HunterError, HunterResult};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub fetch_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present; every variable has a default.
    pub fn from_env() -> HunterResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            model_path: PathBuf::from(get_var_or("MODEL_PATH", "models/detector.json")),
            host: get_var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "8080")?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            fetch_timeout_secs: parse_var("FETCH_TIMEOUT_SECS", "30")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var<T>(key: &str, default: &str) -> HunterResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_var_or(key, default)
        .parse()
        .map_err(|e| HunterError::Config(format!("invalid {key}: {e}")))
}

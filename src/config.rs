use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_DATASET_ID: &str = "593vTo9dheBVf9tFJ";
pub const DEFAULT_APIFY_BASE_URL: &str = "https://api.apify.com/v2";

/// Configuration loaded from environment variables (and `.env` if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub max_workers: usize,
    pub database_path: String,
    pub upload_dir: PathBuf,
    /// Server-held token for the external dataset. Never sent to browsers.
    pub apify_token: Option<String>,
    pub apify_dataset_id: String,
    pub apify_base_url: String,
    pub external_timeout_secs: u64,
    pub session_ttl_secs: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            max_workers: 8,
            database_path: "listings.sqlite3".to_string(),
            upload_dir: PathBuf::from("uploads"),
            apify_token: None,
            apify_dataset_id: DEFAULT_DATASET_ID.to_string(),
            apify_base_url: DEFAULT_APIFY_BASE_URL.to_string(),
            external_timeout_secs: 360,
            session_ttl_secs: 60 * 60 * 24 * 7,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_workers: parse_or("MAX_WORKERS", get("MAX_WORKERS"), defaults.max_workers),
            database_path: get("DATABASE_PATH").unwrap_or(defaults.database_path),
            upload_dir: get("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir),
            apify_token: get("APIFY_TOKEN"),
            apify_dataset_id: get("APIFY_DATASET_ID").unwrap_or(defaults.apify_dataset_id),
            apify_base_url: get("APIFY_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.apify_base_url),
            external_timeout_secs: parse_or(
                "EXTERNAL_TIMEOUT_SECS",
                get("EXTERNAL_TIMEOUT_SECS"),
                defaults.external_timeout_secs,
            ),
            session_ttl_secs: parse_or(
                "SESSION_TTL_SECS",
                get("SESSION_TTL_SECS"),
                defaults.session_ttl_secs,
            ),
        }
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw {
        None => default,
        Some(s) => s.parse().unwrap_or_else(|_| {
            warn!(key, value = %s, %default, "invalid config value, using default");
            default
        }),
    }
}

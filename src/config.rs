use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Backend base URL, always ending in `/api`.
    pub api_url: String,
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
    pub secure_cookies: bool,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url = normalize_api_url(
            &std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        );

        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let template_dir = base_dir.join(
            std::env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string()),
        );
        let static_dir =
            base_dir.join(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));

        let secure_cookies = std::env::var("SECURE_COOKIES")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => 3000,
        };

        Ok(Self {
            api_url,
            template_dir,
            static_dir,
            secure_cookies,
            host,
            port,
        })
    }

    /// Configuration pointing at `api_url` with everything else defaulted.
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: normalize_api_url(api_url),
            template_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            secure_cookies: false,
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Drops a trailing slash and makes sure the URL ends with `/api`.
pub fn normalize_api_url(raw: &str) -> String {
    let base = raw.trim().trim_end_matches('/');
    if base.ends_with("/api") {
        base.to_string()
    } else {
        format!("{}/api", base)
    }
}

use dotenvy::dotenv;
use std::env;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite:db.sqlite";
const DEFAULT_NOTIFY_INTERVAL_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
    #[error("could not load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
    #[error("invalid HOSTING value (expected true|false): {0}")]
    InvalidHosting(String),
    #[error("invalid WEBHOOK_URL: {0}")]
    InvalidWebhookUrl(String),
    #[error("invalid PORT (expected 0-65535): {0}")]
    InvalidPort(String),
    #[error("invalid NOTIFY_INTERVAL_SECS (expected a positive integer): {0}")]
    InvalidNotifyInterval(String),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub token: String,
    pub database_url: String,
    pub notify_interval_secs: u64,
    pub hosting: bool,
    pub webhook_url: Option<url::Url>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if cfg!(not(test)) {
            load_dotenv()?;
        }

        let token = env::var("TOKEN").map_err(|_| ConfigError::MissingEnv("TOKEN"))?;

        let database_url = match env::var("DATABASE_URL") {
            Ok(s) if !s.trim().is_empty() => s,
            _ => DEFAULT_DATABASE_URL.to_string(),
        };

        let notify_interval_secs = match env::var("NOTIFY_INTERVAL_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidNotifyInterval(raw)),
            },
            Err(_) => DEFAULT_NOTIFY_INTERVAL_SECS,
        };

        let hosting = match env::var("HOSTING") {
            Ok(raw) => match raw.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                other => return Err(ConfigError::InvalidHosting(other.to_string())),
            },
            Err(_) => false,
        };

        let webhook_url = match env::var("WEBHOOK_URL") {
            Ok(s) if !s.trim().is_empty() => {
                let parsed =
                    url::Url::parse(&s).map_err(|_| ConfigError::InvalidWebhookUrl(s.clone()))?;
                Some(parsed)
            }
            _ => None,
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => 8080u16,
        };

        Ok(AppConfig {
            token,
            database_url,
            notify_interval_secs,
            hosting,
            webhook_url,
            port,
        })
    }
}

// A missing .env is fine, a broken one is not.
fn load_dotenv() -> Result<(), ConfigError> {
    match dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::DotEnv(e)),
    }
}

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::error::ClientError;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub media: MediaConfig,
    pub booking: BookingConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Настройки удалённого API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

// Настройки медиа (постеры)
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub base_url: String,
    pub placeholder_url: String,
}

// Настройки бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub ticket_price: u64,
    pub currency_suffix: String,
}

pub const DEFAULT_PLACEHOLDER_URL: &str = "https://via.placeholder.com/400x600?text=No+Image";
pub const DEFAULT_TICKET_PRICE: u64 = 75_000;

impl Config {
    /// Подхватывает `.env` (если он есть) и читает конфигурацию из окружения.
    pub fn load() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Читает конфигурацию из переменных окружения.
    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Config {
            app: AppConfig {
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_client=debug,reqwest=info".to_string()),
            },
            api: ApiConfig {
                base_url: env::var("API_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string()),
                token: env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty()),
                timeout_seconds: parse_var("API_TIMEOUT_SECONDS", 15)?,
            },
            media: MediaConfig {
                base_url: env::var("MEDIA_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
                placeholder_url: env::var("POSTER_PLACEHOLDER_URL")
                    .unwrap_or_else(|_| DEFAULT_PLACEHOLDER_URL.to_string()),
            },
            booking: BookingConfig {
                ticket_price: parse_var("TICKET_PRICE", DEFAULT_TICKET_PRICE)?,
                currency_suffix: env::var("CURRENCY_SUFFIX").unwrap_or_else(|_| "đ".to_string()),
            },
        })
    }

    /// Конфигурация без окружения: только адреса API и медиа, остальное по умолчанию.
    pub fn for_api(base_url: impl Into<String>, media_base_url: impl Into<String>) -> Self {
        Config {
            app: AppConfig {
                environment: "test".to_string(),
                rust_log: "cinema_client=debug".to_string(),
            },
            api: ApiConfig {
                base_url: base_url.into(),
                token: None,
                timeout_seconds: 15,
            },
            media: MediaConfig {
                base_url: media_base_url.into(),
                placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            },
            booking: BookingConfig {
                ticket_price: DEFAULT_TICKET_PRICE,
                currency_suffix: "đ".to_string(),
            },
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ClientError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ClientError::Config(format!("{} must be a valid number, got '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

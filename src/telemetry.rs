use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

/// JSON-логи везде, кроме локальной разработки и тестов.
pub fn use_json_logs(config: &AppConfig) -> bool {
    !matches!(
        config.environment.to_ascii_lowercase().as_str(),
        "development" | "dev" | "local" | "test"
    )
}

/// Устанавливает глобальный подписчик tracing.
///
/// Повторный вызов безопасен: возвращает `false`, если подписчик уже был установлен.
pub fn init_tracing(config: &AppConfig) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.rust_log)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let (json_layer, plain_layer) = if use_json_logs(config) {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(plain_layer)
        .try_init()
        .is_ok()
}

use thiserror::Error;

/// Ошибки клиента кинотеатра.
///
/// Ни одна из них не фатальна для процесса: каждая превращается
/// в состояние экрана, которое можно показать повторно.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Запрос не дошёл, истёк таймаут, сервер ответил неожиданным статусом
    /// или тело ответа не удалось разобрать.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Неуспешный статус, который reqwest не считает ошибкой (1xx или
    /// неотработанный 3xx). Относится к сетевым ошибкам, как и `Network`.
    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),

    /// Сервер сообщил, что фильма, сеанса или схемы зала нет.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Бронирование отклонено, обычно потому что место уже заняли.
    #[error("booking rejected: {message}")]
    Conflict { message: String },

    /// Нарушено предусловие бронирования, запрос не отправлялся.
    #[error("invalid booking request: {0}")]
    InvalidBooking(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        ClientError::NotFound { resource: resource.into() }
    }

    /// Запрос не удался на уровне транспорта или протокола.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::UnexpectedStatus(_))
    }

    /// Текст для пользователя, который можно показать на экране как есть.
    /// Язык интерфейса приложения - вьетнамский.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) | ClientError::UnexpectedStatus(_) => {
                "Không thể kết nối đến máy chủ.".to_string()
            }
            ClientError::NotFound { .. } => "Không tìm thấy dữ liệu.".to_string(),
            ClientError::Conflict { .. } => {
                "Đặt vé thất bại. Ghế có thể đã có người chọn.".to_string()
            }
            ClientError::InvalidBooking(reason) => format!("Không thể đặt vé: {}", reason),
            ClientError::Config(_) => "Lỗi cấu hình ứng dụng.".to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

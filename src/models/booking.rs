use serde::{Deserialize, Serialize};
use validator::Validate;

/// Тело `POST /bookings/`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct BookingRequest {
    #[validate(range(min = 1))]
    pub showtime: i64,
    #[validate(length(min = 1))]
    pub seats: Vec<i64>,
}

/// Ответ на успешное бронирование. Сервер может прислать пустое тело,
/// поэтому все поля необязательные.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[serde(default)]
    pub qr_code: Option<String>,
}

/// Запись из истории бронирований пользователя.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    pub movie_title: String,
    pub showtime_display: String,
    /// Метки мест через запятую, например "A1, A2".
    pub seat_labels: String,
    /// Десятичная сумма в виде строки, как её отдаёт сервер.
    pub total_price: String,
    #[serde(default)]
    pub qr_code: Option<String>,
    pub created_at: String,
}

impl BookingRecord {
    pub fn seat_label_list(&self) -> Vec<&str> {
        self.seat_labels
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

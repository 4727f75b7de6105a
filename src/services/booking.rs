//! booking.rs
//!
//! Отправка бронирования и сессия выбора мест.
//!
//! Ключевые компоненты:
//! 1.  **BookingSubmitter**: превращает выбор в один `POST /bookings/` и
//!     классифицирует ответ (успех, конфликт, сетевая ошибка).
//! 2.  **BookingSession**: владеет схемой зала одного сеанса и проводит
//!     пользователя по состояниям
//!     `Idle -> Loading -> Loaded <-> Selecting -> Submitting -> (Succeeded | Loaded)`.
//!     Любой отказ при отправке ведёт к перезагрузке схемы: место, занятое
//!     кем-то между загрузкой и отправкой, это ожидаемая гонка.

use tracing::{error, info, warn};
use validator::Validate;

use crate::api_client::{ApiClient, NO_QUERY};
use crate::config::BookingConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{BookingConfirmation, BookingRecord, BookingRequest};
use crate::navigation::NavigationIntent;
use crate::services::seat_board::{format_price, SeatBoard};

/// Клиент для отправки бронирований.
#[derive(Clone)]
pub struct BookingSubmitter {
    api: ApiClient,
}

impl BookingSubmitter {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// POST /bookings/ с телом `{ showtime, seats }`.
    ///
    /// Предусловия проверяются локально: пустой выбор или отсутствующий
    /// сеанс дают `InvalidBooking` без запроса к серверу.
    pub async fn submit(&self, showtime_id: i64, seat_ids: &[i64]) -> ClientResult<BookingConfirmation> {
        let request = BookingRequest {
            showtime: showtime_id,
            seats: seat_ids.to_vec(),
        };

        if let Err(e) = request.validate() {
            warn!("Booking request rejected locally: {}", e);
            return Err(if seat_ids.is_empty() {
                ClientError::InvalidBooking("no seats selected")
            } else {
                ClientError::InvalidBooking("showtime is missing")
            });
        }

        info!("Submitting booking: showtime={}, seats={:?}", showtime_id, seat_ids);

        let confirmation: BookingConfirmation = self
            .api
            .post_booking("bookings/", &request, &format!("showtime {}", showtime_id))
            .await?;

        info!(
            "Booking accepted: showtime={}, booking_id={:?}",
            showtime_id, confirmation.booking_id
        );
        Ok(confirmation)
    }

    /// GET /bookings/my-history/ - требует токен пользователя.
    pub async fn list_booking_history(&self) -> ClientResult<Vec<BookingRecord>> {
        self.api
            .get_json("bookings/my-history/", NO_QUERY, "booking history")
            .await
    }
}

/// Состояние сессии бронирования.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPhase {
    Idle,
    Loading,
    /// Схема загружена, ничего не выбрано.
    Loaded,
    /// Схема загружена и выбрано хотя бы одно место.
    Selecting,
    Submitting,
    Succeeded,
    /// Загрузка схемы не удалась; можно повторить `load`.
    Failed,
}

/// Сводка для подтверждения перед оплатой.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub movie_title: String,
    pub seat_labels: Vec<String>,
    pub seat_count: usize,
    pub total: u128,
    pub total_display: String,
}

/// Одна сессия экрана бронирования: сеанс, схема зала, выбор и отправка.
pub struct BookingSession {
    board: SeatBoard,
    movie_title: String,
    api: ApiClient,
    submitter: BookingSubmitter,
    pricing: BookingConfig,
    phase: BookingPhase,
    last_error: Option<String>,
    confirmation: Option<BookingConfirmation>,
}

impl BookingSession {
    pub fn new(
        api: ApiClient,
        showtime_id: i64,
        movie_title: impl Into<String>,
        pricing: BookingConfig,
    ) -> Self {
        Self {
            board: SeatBoard::new(showtime_id),
            movie_title: movie_title.into(),
            submitter: BookingSubmitter::new(api.clone()),
            api,
            pricing,
            phase: BookingPhase::Idle,
            last_error: None,
            confirmation: None,
        }
    }

    pub fn phase(&self) -> BookingPhase {
        self.phase
    }

    pub fn board(&self) -> &SeatBoard {
        &self.board
    }

    pub fn movie_title(&self) -> &str {
        &self.movie_title
    }

    /// Последнее сообщение об ошибке для пользователя.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    /// Загружает (или перезагружает) схему зала. Выбор всегда сбрасывается.
    pub async fn load(&mut self) -> ClientResult<()> {
        self.phase = BookingPhase::Loading;
        match self.board.load_seats(&self.api).await {
            Ok(_) => {
                self.phase = BookingPhase::Loaded;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.phase = BookingPhase::Failed;
                self.last_error = Some(match &e {
                    ClientError::NotFound { .. } => "Suất chiếu này chưa được tạo sơ đồ ghế.".to_string(),
                    other => other.user_message(),
                });
                Err(e)
            }
        }
    }

    /// Переключает место. Работает только когда схема загружена.
    pub fn toggle(&mut self, seat_id: i64) -> bool {
        if !matches!(self.phase, BookingPhase::Loaded | BookingPhase::Selecting) {
            return false;
        }
        let changed = self.board.toggle(seat_id);
        self.phase = if self.board.has_selection() {
            BookingPhase::Selecting
        } else {
            BookingPhase::Loaded
        };
        changed
    }

    pub fn total(&self) -> u128 {
        self.board.compute_total(self.pricing.ticket_price)
    }

    pub fn summary(&self) -> BookingSummary {
        let total = self.total();
        BookingSummary {
            movie_title: self.movie_title.clone(),
            seat_labels: self.board.selected_labels().into_iter().map(str::to_string).collect(),
            seat_count: self.board.selection().len(),
            total,
            total_display: format_price(total, &self.pricing.currency_suffix),
        }
    }

    /// Отправляет бронирование.
    ///
    /// Успех: сессия в `Succeeded`, вызывающему возвращается переход к списку фильмов.
    /// Отказ или сетевая ошибка: схема перезагружается, выбор очищается,
    /// возвращается исходная ошибка.
    pub async fn submit(&mut self) -> ClientResult<NavigationIntent> {
        if self.phase != BookingPhase::Selecting {
            return Err(ClientError::InvalidBooking("no seats selected"));
        }

        self.phase = BookingPhase::Submitting;
        let seat_ids = self.board.selected_ids();

        match self.submitter.submit(self.board.showtime_id(), &seat_ids).await {
            Ok(confirmation) => {
                self.phase = BookingPhase::Succeeded;
                self.last_error = None;
                self.confirmation = Some(confirmation);
                Ok(NavigationIntent::MovieListing)
            }
            Err(ClientError::InvalidBooking(reason)) => {
                self.phase = BookingPhase::Selecting;
                Err(ClientError::InvalidBooking(reason))
            }
            Err(e) => {
                warn!(
                    "Booking for showtime {} failed, reloading seats: {}",
                    self.board.showtime_id(),
                    e
                );
                let message = e.user_message();
                if let Err(reload_err) = self.load().await {
                    error!("Seat reload after failed booking also failed: {:?}", reload_err);
                }
                self.last_error = Some(message);
                Err(e)
            }
        }
    }
}

pub mod config;
pub mod error;
pub mod api_client;
pub mod media;
pub mod models;
pub mod navigation;
pub mod screen;
pub mod services;
pub mod telemetry;

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

pub use error::{ClientError, ClientResult};

use models::{Movie, MoviePage};
use screen::ScreenState;
use services::{BookingSession, BookingSubmitter, CatalogFetcher};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub api: api_client::ApiClient,
    pub media: media::MediaResolver,
    pub catalog: CatalogFetcher,
    pub bookings: BookingSubmitter,
}

impl AppState {
    pub fn new(config: config::Config) -> ClientResult<Arc<Self>> {
        let api = api_client::ApiClient::from_config(&config.api)?;
        let media = media::MediaResolver::from_config(&config.media);
        let catalog = CatalogFetcher::new(api.clone(), media.clone());
        let bookings = BookingSubmitter::new(api.clone());

        info!(
            "Cinema client ready: api={}, media={}, env={}",
            config.api.base_url, config.media.base_url, config.app.environment
        );

        Ok(Arc::new(Self {
            config,
            api,
            media,
            catalog,
            bookings,
        }))
    }

    /// Сессия экрана бронирования для выбранного сеанса.
    pub fn booking_session(&self, showtime_id: i64, movie_title: impl Into<String>) -> BookingSession {
        BookingSession::new(
            self.api.clone(),
            showtime_id,
            movie_title,
            self.config.booking.clone(),
        )
    }

    /// Загружает список фильмов в фоне. Если экран закрыт до ответа,
    /// результат выбрасывается; задача возвращает, был ли он доставлен.
    pub fn load_movies_into(self: &Arc<Self>, screen: &ScreenState<Vec<Movie>>) -> JoinHandle<bool> {
        let setter = screen.setter();
        let state = self.clone();
        tokio::spawn(async move {
            let result = state.catalog.list_movies().await;
            setter.set(result)
        })
    }

    /// То же для экрана фильма: карточка и сеансы грузятся параллельно.
    pub fn load_movie_page_into(
        self: &Arc<Self>,
        movie_id: i64,
        screen: &ScreenState<MoviePage>,
    ) -> JoinHandle<bool> {
        let setter = screen.setter();
        let state = self.clone();
        tokio::spawn(async move {
            let result = state.catalog.load_movie_page(movie_id).await;
            setter.set(result)
        })
    }
}

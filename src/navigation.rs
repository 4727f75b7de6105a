use crate::models::{Movie, Showtime};

/// Куда перейти дальше. Сам переход выполняет UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Список фильмов, например после успешного бронирования.
    MovieListing,
    MovieDetail { movie_id: i64 },
    Booking { showtime_id: i64, movie_title: String },
}

impl NavigationIntent {
    pub fn movie_detail(movie: &Movie) -> Self {
        NavigationIntent::MovieDetail { movie_id: movie.id }
    }

    pub fn booking(showtime: &Showtime, movie_title: &str) -> Self {
        NavigationIntent::Booking {
            showtime_id: showtime.id,
            movie_title: movie_title.to_string(),
        }
    }
}

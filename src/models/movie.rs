use serde::{Deserialize, Serialize};

use crate::media::MediaResolver;
use crate::models::Showtime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Ссылка на постер: абсолютный URL или путь относительно медиа-сервера.
    #[serde(default)]
    pub image: Option<String>,
    /// Длительность в минутах.
    pub duration: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
}

impl Movie {
    pub fn poster_url(&self, media: &MediaResolver) -> String {
        media.resolve(self.image.as_deref())
    }
}

/// Всё, что нужно экрану фильма: сам фильм и его сеансы.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub movie: Movie,
    pub showtimes: Vec<Showtime>,
}

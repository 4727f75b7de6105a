use tracing::{error, info};

use crate::api_client::{ApiClient, NO_QUERY};
use crate::error::ClientResult;
use crate::media::MediaResolver;
use crate::models::{Movie, MoviePage, Showtime};

/// Каталог: список фильмов, карточка фильма и его сеансы.
#[derive(Clone)]
pub struct CatalogFetcher {
    api: ApiClient,
    media: MediaResolver,
}

impl CatalogFetcher {
    pub fn new(api: ApiClient, media: MediaResolver) -> Self {
        Self { api, media }
    }

    pub fn media(&self) -> &MediaResolver {
        &self.media
    }

    // GET /movies/
    pub async fn list_movies(&self) -> ClientResult<Vec<Movie>> {
        let movies: Vec<Movie> = self.api.get_json("movies/", NO_QUERY, "movie list").await?;
        info!("Loaded {} movies", movies.len());
        Ok(movies)
    }

    // GET /movies/{id}/
    pub async fn get_movie_detail(&self, movie_id: i64) -> ClientResult<Movie> {
        self.api
            .get_json(&format!("movies/{}/", movie_id), NO_QUERY, &format!("movie {}", movie_id))
            .await
    }

    // GET /showtimes/?movie_id={id}
    pub async fn list_showtimes(&self, movie_id: i64) -> ClientResult<Vec<Showtime>> {
        self.api
            .get_json(
                "showtimes/",
                &[("movie_id", movie_id)],
                &format!("showtimes of movie {}", movie_id),
            )
            .await
    }

    /// Загружает карточку фильма и сеансы параллельно.
    /// Страница считается загруженной только когда пришли оба ответа.
    pub async fn load_movie_page(&self, movie_id: i64) -> ClientResult<MoviePage> {
        let (movie, showtimes) = tokio::try_join!(
            self.get_movie_detail(movie_id),
            self.list_showtimes(movie_id)
        )
        .map_err(|e| {
            error!("Failed to load movie page {}: {:?}", movie_id, e);
            e
        })?;

        info!("Movie {} loaded with {} showtimes", movie_id, showtimes.len());
        Ok(MoviePage { movie, showtimes })
    }
}

/// Фильтр по названию без учёта регистра. Порядок сервера сохраняется,
/// пустой запрос возвращает всё.
pub fn filter_movies<'a>(movies: &'a [Movie], query: &str) -> Vec<&'a Movie> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return movies.iter().collect();
    }
    movies
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}

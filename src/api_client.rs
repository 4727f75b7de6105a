//! api_client.rs
//!
//! HTTP-транспорт до API кинотеатра. Каждый вызов - ровно один запрос:
//! без повторов, без кеша, без пагинации. Решение о том, что показать
//! пользователю при ошибке, принимает вызывающая сторона.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Пустой набор query-параметров.
pub const NO_QUERY: &[(&str, &str)] = &[];

/// Клиент для взаимодействия с API кинотеатра.
#[derive(Clone)]
pub struct ApiClient {
    /// Базовый URL API, например `http://host:8000/api`.
    base_url: String,
    /// Токен для `Authorization: Bearer`, если пользователь вошёл.
    token: Option<String>,
    /// Асинхронный HTTP-клиент.
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Создает и конфигурирует клиент на основе настроек приложения.
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Склеивает базовый URL и путь ровно через один слэш.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http_client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET с разбором JSON. 404 превращается в `NotFound { resource }`,
    /// любой другой неуспешный статус - в `Network`.
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q, resource: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!("GET {} ({})", path, resource);

        let response = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("GET {} failed: {:?}", path, e);
                ClientError::Network(e)
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("GET {} returned 404 for {}", path, resource);
            return Err(ClientError::not_found(resource));
        }

        let response = response.error_for_status().map_err(|e| {
            error!("GET {} returned error status: {:?}", path, e.status());
            ClientError::Network(e)
        })?;

        Ok(response.json::<T>().await?)
    }

    /// POST с JSON-телом для бронирования.
    ///
    /// 400, 409 и 422 считаются конфликтом: сервер отверг выбранные места.
    /// Тело успешного ответа разбирается мягко - пустое или не-JSON тело
    /// тоже означает успех.
    pub async fn post_booking<B, T>(&self, path: &str, body: &B, resource: &str) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        info!("POST {}", path);

        let response = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("POST {} failed: {:?}", path, e);
                ClientError::Network(e)
            })?;

        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(T::default());
            }
            return Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
                debug!("POST {} succeeded with unparsed body: {}", path, e);
                T::default()
            }));
        }

        match status {
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                let text = response.text().await.unwrap_or_default();
                let message = extract_error_message(&text)
                    .unwrap_or_else(|| format!("server rejected booking with status {}", status.as_u16()));
                warn!("POST {} rejected ({}): {}", path, status, message);
                Err(ClientError::Conflict { message })
            }
            StatusCode::NOT_FOUND => {
                warn!("POST {} returned 404 for {}", path, resource);
                Err(ClientError::not_found(resource))
            }
            _ => {
                let err = response
                    .error_for_status()
                    .err()
                    .map(ClientError::Network)
                    .unwrap_or(ClientError::UnexpectedStatus(status.as_u16()));
                error!("POST {} failed with status {}", path, status);
                Err(err)
            }
        }
    }
}

/// Достаёт текст ошибки из тела ответа: `error`, `detail` или `message`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::from_config(&ApiConfig {
            base_url: base.to_string(),
            token: None,
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn url_joins_with_single_slash() {
        assert_eq!(client("http://h/api/").url("/movies/"), "http://h/api/movies/");
        assert_eq!(client("http://h/api").url("movies/"), "http://h/api/movies/");
    }

    #[test]
    fn error_message_prefers_error_field() {
        assert_eq!(
            extract_error_message(r#"{"error": "seat taken", "message": "x"}"#).as_deref(),
            Some("seat taken")
        );
        assert_eq!(extract_error_message(r#"{"detail": "nope"}"#).as_deref(), Some("nope"));
        assert_eq!(extract_error_message("<html>"), None);
    }
}

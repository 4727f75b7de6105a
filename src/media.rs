use crate::config::MediaConfig;

/// Превращает ссылку на изображение из API в URL, который можно загрузить.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    base_url: String,
    placeholder_url: String,
}

impl MediaResolver {
    pub fn new(base_url: impl Into<String>, placeholder_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            placeholder_url: placeholder_url.into(),
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(config.base_url.clone(), config.placeholder_url.clone())
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder_url
    }

    /// Абсолютный URL возвращается без изменений, относительный путь
    /// склеивается с медиа-базой ровно через один слэш, пустая ссылка даёт заглушку.
    pub fn resolve(&self, reference: Option<&str>) -> String {
        let reference = match reference.map(str::trim) {
            Some(r) if !r.is_empty() => r,
            _ => return self.placeholder_url.clone(),
        };

        if is_absolute(reference) {
            return reference.to_string();
        }

        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            reference.trim_start_matches('/')
        )
    }
}

fn is_absolute(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "https://placeholder/none.png";

    fn resolver(base: &str) -> MediaResolver {
        MediaResolver::new(base, PLACEHOLDER)
    }

    #[test]
    fn relative_reference_joins_with_single_slash() {
        assert_eq!(resolver("https://m/").resolve(Some("a.jpg")), "https://m/a.jpg");
        assert_eq!(resolver("https://m").resolve(Some("a.jpg")), "https://m/a.jpg");
        assert_eq!(resolver("https://m/").resolve(Some("/media/a.jpg")), "https://m/media/a.jpg");
        assert_eq!(resolver("https://m").resolve(Some("/a.jpg")), "https://m/a.jpg");
    }

    #[test]
    fn absolute_reference_is_unchanged() {
        assert_eq!(resolver("https://m/").resolve(Some("http://x/a.jpg")), "http://x/a.jpg");
        assert_eq!(resolver("https://m/").resolve(Some("https://x/a.jpg")), "https://x/a.jpg");
    }

    #[test]
    fn localhost_is_not_rewritten() {
        assert_eq!(
            resolver("https://m/").resolve(Some("http://localhost:8000/a.jpg")),
            "http://localhost:8000/a.jpg"
        );
    }

    #[test]
    fn missing_reference_gives_placeholder() {
        let r = resolver("https://m/");
        assert_eq!(r.resolve(None), PLACEHOLDER);
        assert_eq!(r.resolve(Some("")), PLACEHOLDER);
        assert_eq!(r.resolve(Some("   ")), PLACEHOLDER);
    }
}

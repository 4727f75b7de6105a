use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showtime {
    pub id: i64,
    pub start_time: String,
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub movie_title: Option<String>,
}

impl Showtime {
    /// Время начала в виде `HH:MM`; если строку не удалось разобрать, возвращается как есть.
    pub fn display_time(&self) -> String {
        let raw = self.start_time.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format("%H:%M").to_string();
        }
        for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
                return dt.format("%H:%M").to_string();
            }
        }
        self.start_time.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn showtime(start: &str) -> Showtime {
        Showtime { id: 1, start_time: start.to_string(), room_name: "Room 1".into(), movie_title: None }
    }

    #[test]
    fn display_time_formats_rfc3339() {
        assert_eq!(showtime("2026-01-14T18:00:00Z").display_time(), "18:00");
        assert_eq!(showtime("2026-01-14T09:30:00+07:00").display_time(), "09:30");
    }

    #[test]
    fn display_time_formats_naive() {
        assert_eq!(showtime("2026-01-14 18:05").display_time(), "18:05");
    }

    #[test]
    fn display_time_keeps_unparseable_string() {
        assert_eq!(showtime("evening").display_time(), "evening");
    }

    #[test]
    fn room_name_is_optional_on_the_wire() {
        let parsed: Showtime = serde_json::from_str(r#"{"id": 3, "start_time": "18:00"}"#).unwrap();
        assert_eq!(parsed.room_name, "");
    }
}

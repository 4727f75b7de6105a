use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: i64,
    pub label: String,
    /// Место занято. Истина на стороне сервера, между загрузками может измениться.
    #[serde(rename = "is_booked")]
    pub occupied: bool,
}

impl Seat {
    pub fn new(id: i64, label: impl Into<String>, occupied: bool) -> Self {
        Seat { id, label: label.into(), occupied }
    }
}

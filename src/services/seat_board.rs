use std::collections::HashSet;
use tracing::{error, info};

use crate::api_client::{ApiClient, NO_QUERY};
use crate::error::ClientResult;
use crate::models::Seat;

/// Схема зала для одного сеанса и локальный выбор мест пользователя.
///
/// Инвариант: в `selection` только id мест, которые при последней загрузке
/// были свободны. Выбор меняется только через `toggle` и сбрасывается
/// при каждой перезагрузке схемы.
#[derive(Debug, Clone)]
pub struct SeatBoard {
    showtime_id: i64,
    seats: Vec<Seat>,
    selection: HashSet<i64>,
}

impl SeatBoard {
    pub fn new(showtime_id: i64) -> Self {
        Self {
            showtime_id,
            seats: Vec::new(),
            selection: HashSet::new(),
        }
    }

    pub fn showtime_id(&self) -> i64 {
        self.showtime_id
    }

    /// GET /seats/{showtime_id}/
    ///
    /// Выбор очищается до запроса, поэтому даже при ошибке в нём не остаётся
    /// устаревших мест. При ошибке сохраняется последняя известная схема.
    pub async fn load_seats(&mut self, api: &ApiClient) -> ClientResult<&[Seat]> {
        self.selection.clear();

        let path = format!("seats/{}/", self.showtime_id);
        let resource = format!("seat map of showtime {}", self.showtime_id);
        match api.get_json::<Vec<Seat>, _>(&path, NO_QUERY, &resource).await {
            Ok(seats) => {
                self.replace_seats(seats);
                info!(
                    "Seat map for showtime {} loaded: {} seats, {} free",
                    self.showtime_id,
                    self.seats.len(),
                    self.available_count()
                );
                Ok(&self.seats)
            }
            Err(e) => {
                error!("Failed to load seats for showtime {}: {:?}", self.showtime_id, e);
                Err(e)
            }
        }
    }

    /// Подменяет схему зала свежими данными сервера и сбрасывает выбор.
    pub fn replace_seats(&mut self, seats: Vec<Seat>) {
        self.seats = seats;
        self.selection.clear();
    }

    /// Переключает место. Занятое или неизвестное место не трогается.
    /// Возвращает `true`, если выбор изменился.
    pub fn toggle(&mut self, seat_id: i64) -> bool {
        let free = self.seats.iter().any(|s| s.id == seat_id && !s.occupied);
        if !free {
            return false;
        }
        if !self.selection.remove(&seat_id) {
            self.selection.insert(seat_id);
        }
        true
    }

    /// `|selection| * price_per_seat`. Сумма в `u128`: произведение двух `u64` в неё всегда помещается.
    pub fn compute_total(&self, price_per_seat: u64) -> u128 {
        self.selection.len() as u128 * u128::from(price_per_seat)
    }

    /// Метки выбранных мест в порядке схемы зала, а не в порядке выбора.
    pub fn selected_labels(&self) -> Vec<&str> {
        self.seats
            .iter()
            .filter(|s| self.selection.contains(&s.id))
            .map(|s| s.label.as_str())
            .collect()
    }

    /// Id выбранных мест в порядке схемы зала.
    pub fn selected_ids(&self) -> Vec<i64> {
        self.seats
            .iter()
            .filter(|s| self.selection.contains(&s.id))
            .map(|s| s.id)
            .collect()
    }

    pub fn selection(&self) -> &HashSet<i64> {
        &self.selection
    }

    pub fn is_selected(&self, seat_id: i64) -> bool {
        self.selection.contains(&seat_id)
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn available_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.occupied).count()
    }
}

/// Сумма с разделителями тысяч и суффиксом валюты: `150,000đ`.
pub fn format_price(amount: u128, currency_suffix: &str) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + currency_suffix.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(currency_suffix);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn board(seats: Vec<Seat>) -> SeatBoard {
        let mut board = SeatBoard::new(1);
        board.replace_seats(seats);
        board
    }

    fn sample() -> Vec<Seat> {
        vec![Seat::new(1, "A1", false), Seat::new(2, "A2", true)]
    }

    #[test]
    fn toggle_free_seat_selects_it() {
        let mut b = board(sample());
        assert!(b.toggle(1));
        assert!(b.is_selected(1));
        assert_eq!(b.selected_labels(), vec!["A1"]);
    }

    #[test]
    fn toggle_occupied_seat_is_noop() {
        let mut b = board(sample());
        b.toggle(1);
        assert!(!b.toggle(2));
        assert_eq!(b.selected_ids(), vec![1]);
    }

    #[test]
    fn toggle_unknown_seat_is_noop() {
        let mut b = board(sample());
        assert!(!b.toggle(99));
        assert!(!b.has_selection());
    }

    #[test]
    fn labels_follow_seat_map_order() {
        let mut b = board(vec![
            Seat::new(10, "B1", false),
            Seat::new(11, "B2", false),
            Seat::new(12, "B3", false),
        ]);
        b.toggle(12);
        b.toggle(10);
        assert_eq!(b.selected_labels(), vec!["B1", "B3"]);
        assert_eq!(b.selected_ids(), vec![10, 12]);
    }

    #[test]
    fn reload_clears_selection_and_drops_taken_seats() {
        let mut b = board(sample());
        b.toggle(1);
        b.replace_seats(vec![Seat::new(1, "A1", true), Seat::new(2, "A2", true)]);
        assert!(b.selection().is_empty());
        assert!(!b.toggle(1));
    }

    #[test]
    fn total_counts_selected_seats() {
        let mut b = board(vec![Seat::new(1, "A1", false), Seat::new(2, "A2", false)]);
        b.toggle(1);
        b.toggle(2);
        assert_eq!(b.compute_total(75_000), 150_000);
    }

    #[test]
    fn total_does_not_overflow_on_huge_price() {
        let mut b = board(vec![Seat::new(1, "A1", false), Seat::new(2, "A2", false)]);
        b.toggle(1);
        b.toggle(2);
        let price = u64::MAX / 2 + 1;
        assert_eq!(b.compute_total(price), 2 * u128::from(price));
        assert_eq!(b.compute_total(u64::MAX), 2 * u128::from(u64::MAX));
    }

    #[test]
    fn format_price_groups_thousands() {
        assert_eq!(format_price(0, "đ"), "0đ");
        assert_eq!(format_price(999, "đ"), "999đ");
        assert_eq!(format_price(150_000, "đ"), "150,000đ");
        assert_eq!(format_price(1_234_567, ""), "1,234,567");
        assert_eq!(
            format_price(2 * u128::from(u64::MAX), ""),
            "36,893,488,147,419,103,230"
        );
    }

    fn seats_strategy() -> impl Strategy<Value = Vec<Seat>> {
        prop::collection::vec(any::<bool>(), 0..40).prop_map(|flags| {
            flags
                .into_iter()
                .enumerate()
                .map(|(i, occupied)| Seat::new(i as i64, format!("S{}", i), occupied))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn occupied_seats_never_enter_selection(
            seats in seats_strategy(),
            toggles in prop::collection::vec(0i64..45, 0..100),
        ) {
            let mut b = board(seats.clone());
            for id in toggles {
                let before = b.selection().clone();
                b.toggle(id);
                if seats.iter().any(|s| s.id == id && s.occupied) {
                    prop_assert_eq!(&before, b.selection());
                }
            }
            for id in b.selection() {
                prop_assert!(seats.iter().any(|s| s.id == *id && !s.occupied));
            }
        }

        #[test]
        fn double_toggle_is_involution(
            seats in seats_strategy(),
            prefix in prop::collection::vec(0i64..45, 0..30),
            id in 0i64..45,
        ) {
            let mut b = board(seats);
            for t in prefix {
                b.toggle(t);
            }
            let before = b.selection().clone();
            b.toggle(id);
            b.toggle(id);
            prop_assert_eq!(&before, b.selection());
        }

        #[test]
        fn total_is_count_times_price(
            seats in seats_strategy(),
            toggles in prop::collection::vec(0i64..45, 0..60),
            price in any::<u64>(),
        ) {
            let mut b = board(seats);
            for t in toggles {
                b.toggle(t);
            }
            prop_assert_eq!(b.compute_total(price), b.selection().len() as u128 * price as u128);
        }

        #[test]
        fn replace_always_empties_selection(
            seats in seats_strategy(),
            fresh in seats_strategy(),
            toggles in prop::collection::vec(0i64..45, 0..30),
        ) {
            let mut b = board(seats);
            for t in toggles {
                b.toggle(t);
            }
            b.replace_seats(fresh);
            prop_assert!(b.selection().is_empty());
        }
    }
}

pub mod booking;
pub mod catalog;
pub mod seat_board;

pub use booking::{BookingPhase, BookingSession, BookingSubmitter, BookingSummary};
pub use catalog::{filter_movies, CatalogFetcher};
pub use seat_board::{format_price, SeatBoard};

pub mod movie;
pub mod showtime;
pub mod seat;
pub mod booking;

pub use movie::{Movie, MoviePage};
pub use showtime::Showtime;
pub use seat::Seat;
pub use booking::{BookingConfirmation, BookingRecord, BookingRequest};

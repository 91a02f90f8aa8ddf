pub mod booking;
pub mod movie;
pub mod seat;

pub use booking::{Booking, Customer};
pub use movie::Movie;

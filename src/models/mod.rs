pub mod auth;
pub mod booking;
pub mod dish;
pub mod table;
pub(crate) mod wire_time;

pub use auth::{AuthResponse, LoginRequest};
pub use booking::{Booking, BookingRequest, Customer};
pub use dish::Dish;
pub use table::{AvailabilityQuery, Table};

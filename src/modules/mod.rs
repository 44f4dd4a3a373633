pub mod auth;
pub mod bookings;
pub mod contact;
pub mod properties;
pub mod sales;
pub mod users;

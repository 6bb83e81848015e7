pub mod auth;
pub mod health;
pub mod hotel;
pub mod my_booking;
pub mod my_hotel;
pub mod user;

pub mod auth;
pub mod booking;
pub mod hotel;
pub mod user;

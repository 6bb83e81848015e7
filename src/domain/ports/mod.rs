use crate::domain::models::{user::User, hotel::Hotel, booking::Booking};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn set_reset_token(&self, user_id: &str, token_hash: &str, expires_at: DateTime<Utc>) -> Result<(), AppError>;
    async fn find_by_reset_token(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>, AppError>;
    /// Replaces the password and clears the reset fields in one conditional write.
    /// Returns the affected user id, or `None` when the token is unknown or expired.
    async fn consume_reset_token(&self, token_hash: &str, new_password_hash: &str, now: DateTime<Utc>) -> Result<Option<String>, AppError>;
    async fn clear_expired_reset_tokens(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Hotel>, AppError>;
    async fn find_by_owner(&self, owner_id: &str, id: &str) -> Result<Option<Hotel>, AppError>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Hotel>, AppError>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Hotel>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    /// Hotels holding at least one booking made by `user_id`.
    async fn list_booked_by_user(&self, user_id: &str) -> Result<Vec<Hotel>, AppError>;
    /// Writes metadata only if the stored version still equals `expected_version`.
    /// Returns `None` when no row matched.
    async fn update(&self, hotel: &Hotel, expected_version: i64) -> Result<Option<Hotel>, AppError>;
}

/// Booking mutations are scoped to their parent hotel: each one runs in a single
/// transaction that first bumps the hotel's version, serializing writers per hotel.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn list_by_hotel(&self, hotel_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn cancel(&self, hotel_id: &str, booking_id: &str, user_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn has_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| v.trim().is_empty()) {
        return Err(ValidationError::new("empty"));
    }
    Ok(())
}

fn stay_date(value: &str) -> Result<(), ValidationError> {
    parse_stay_date(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("date"))
}

/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp (its date part is used).
pub fn parse_stay_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
        .or_else(|| DateTime::parse_from_rfc3339(value.trim()).ok().map(|dt| dt.date_naive()))
}

#[derive(Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[validate(custom(function = "not_blank", message = "First Name is required"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last Name is required"))]
    pub last_name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password with 6 or more characters required"))]
    pub password: String,
}

#[derive(Deserialize, Default, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password with 6 or more characters required"))]
    pub password: String,
}

#[derive(Deserialize, Default, Validate)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email is required"))]
    pub email: String,
}

#[derive(Deserialize, Default, Validate)]
#[serde(default)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 6, message = "Password with 6 or more characters required"))]
    pub password: String,
}

#[derive(Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,
    #[validate(custom(function = "not_blank", message = "Country is required"))]
    pub country: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank", message = "Hotel type is required"))]
    pub hotel_type: String,
    #[validate(range(min = 1, max = 20, message = "Adult capacity must be between 1 and 20"))]
    pub adult_count: i32,
    #[validate(range(min = 0, max = 20, message = "Child capacity must be between 0 and 20"))]
    pub child_count: i32,
    #[validate(custom(function = "has_entries", message = "Facilities are required"))]
    pub facilities: Vec<String>,
    #[validate(range(min = 1, max = 1_000_000, message = "Price per night must be between 1 and 1000000"))]
    pub price_per_night: i64,
    #[validate(range(min = 1, max = 5, message = "Star rating must be between 1 and 5"))]
    pub star_rating: i32,
    pub image_urls: Vec<String>,
}

#[derive(Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateHotelRequest {
    /// The version the caller last read; the write only applies if it is still current.
    #[validate(required(message = "Version is required"))]
    pub version: Option<i64>,
    #[serde(flatten)]
    #[validate(nested)]
    pub details: HotelRequest,
}

#[derive(Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingRequest {
    #[validate(custom(function = "not_blank", message = "First Name is required"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last Name is required"))]
    pub last_name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(range(min = 1, max = 20, message = "Between 1 and 20 adults are required"))]
    pub adult_count: i32,
    #[validate(range(min = 0, max = 20, message = "At most 20 children are allowed"))]
    pub child_count: i32,
    #[validate(custom(function = "stay_date", message = "Check-in date is required (YYYY-MM-DD)"))]
    pub check_in: String,
    #[validate(custom(function = "stay_date", message = "Check-out date is required (YYYY-MM-DD)"))]
    pub check_out: String,
}

#[derive(Deserialize)]
pub struct CancelBookingQuery {
    #[serde(rename = "hotelId")]
    pub hotel_id: Option<String>,
}

#[derive(Deserialize)]
pub struct HotelListQuery {
    pub page: Option<u32>,
}

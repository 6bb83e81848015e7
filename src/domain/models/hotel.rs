use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use crate::domain::models::booking::Booking;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    #[serde(rename = "type")]
    pub hotel_type: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub facilities: Json<Vec<String>>,
    pub price_per_night: i64,
    pub star_rating: i32,
    pub image_urls: Json<Vec<String>>,
    pub version: i64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

pub struct NewHotelParams {
    pub owner_id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    pub hotel_type: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub facilities: Vec<String>,
    pub price_per_night: i64,
    pub star_rating: i32,
    pub image_urls: Vec<String>,
}

impl Hotel {
    pub fn new(params: NewHotelParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: params.owner_id,
            name: params.name,
            city: params.city,
            country: params.country,
            description: params.description,
            hotel_type: params.hotel_type,
            adult_count: params.adult_count,
            child_count: params.child_count,
            facilities: Json(params.facilities),
            price_per_night: params.price_per_night,
            star_rating: params.star_rating,
            image_urls: Json(params.image_urls),
            version: 0,
            last_updated: now,
            created_at: now,
        }
    }
}

/// A hotel projected together with a subset of its bookings.
#[derive(Debug, Serialize, Clone)]
pub struct HotelWithBookings {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub bookings: Vec<Booking>,
}

use axum::{extract::{State, Path}, response::IntoResponse, Json};
use chrono::Utc;
use sqlx::types::Json as JsonColumn;
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{HotelRequest, UpdateHotelRequest};
use validator::Validate;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::hotel::{Hotel, NewHotelParams};
use std::sync::Arc;
use tracing::{info, warn};

fn clean_list(values: Vec<String>) -> Vec<String> {
    values.into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

pub async fn create_hotel(
    State(state): State<Arc<AppState>>,
    AuthUser(owner_id): AuthUser,
    Json(payload): Json<HotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hotel = Hotel::new(NewHotelParams {
        owner_id,
        name: payload.name.trim().to_string(),
        city: payload.city.trim().to_string(),
        country: payload.country.trim().to_string(),
        description: payload.description.trim().to_string(),
        hotel_type: payload.hotel_type.trim().to_string(),
        adult_count: payload.adult_count,
        child_count: payload.child_count,
        facilities: clean_list(payload.facilities),
        price_per_night: payload.price_per_night,
        star_rating: payload.star_rating,
        image_urls: clean_list(payload.image_urls),
    });

    let created = state.hotel_repo.create(&hotel).await?;
    info!("Hotel created: {}", created.id);

    Ok(Json(created))
}

pub async fn list_my_hotels(
    State(state): State<Arc<AppState>>,
    AuthUser(owner_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let hotels = state.hotel_repo.list_by_owner(&owner_id).await?;
    Ok(Json(hotels))
}

pub async fn get_my_hotel(
    State(state): State<Arc<AppState>>,
    AuthUser(owner_id): AuthUser,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = state.reservation_service.hotel_bookings(&owner_id, &hotel_id).await?;
    Ok(Json(hotel))
}

pub async fn update_my_hotel(
    State(state): State<Arc<AppState>>,
    AuthUser(owner_id): AuthUser,
    Path(hotel_id): Path<String>,
    Json(payload): Json<UpdateHotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let expected_version = payload.version.ok_or(AppError::Validation("Version is required".into()))?;
    let details = payload.details;

    let mut hotel = state.hotel_repo.find_by_owner(&owner_id, &hotel_id).await?
        .ok_or(AppError::NotFound("Hotel not found".into()))?;

    hotel.name = details.name.trim().to_string();
    hotel.city = details.city.trim().to_string();
    hotel.country = details.country.trim().to_string();
    hotel.description = details.description.trim().to_string();
    hotel.hotel_type = details.hotel_type.trim().to_string();
    hotel.adult_count = details.adult_count;
    hotel.child_count = details.child_count;
    hotel.facilities = JsonColumn(clean_list(details.facilities));
    hotel.price_per_night = details.price_per_night;
    hotel.star_rating = details.star_rating;
    hotel.image_urls = JsonColumn(clean_list(details.image_urls));
    hotel.last_updated = Utc::now();

    match state.hotel_repo.update(&hotel, expected_version).await? {
        Some(updated) => {
            info!("Hotel updated: {} (version {})", updated.id, updated.version);
            Ok(Json(updated))
        }
        None => {
            warn!("Stale update rejected for hotel {} (expected version {})", hotel_id, expected_version);
            Err(AppError::StaleVersion)
        }
    }
}

use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{parse_stay_date, CreateBookingRequest, HotelListQuery};
use validator::Validate;
use crate::api::dtos::responses::{HotelSearchResponse, Pagination};
use crate::api::extractors::auth::AuthUser;
use crate::domain::services::reservation_service::BookingRequest;
use std::sync::Arc;

pub const PAGE_SIZE: i64 = 5;

pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HotelListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = i64::from(query.page.unwrap_or(1).max(1));

    let total = state.hotel_repo.count().await?;
    let data = state.hotel_repo.list(PAGE_SIZE, (page - 1) * PAGE_SIZE).await?;

    Ok(Json(HotelSearchResponse {
        data,
        pagination: Pagination {
            total,
            page,
            pages: (total + PAGE_SIZE - 1) / PAGE_SIZE,
        },
    }))
}

pub async fn get_hotel(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = state.hotel_repo.find_by_id(&hotel_id).await?
        .ok_or(AppError::NotFound("Hotel not found".into()))?;

    Ok(Json(hotel))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(hotel_id): Path<String>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (Some(check_in), Some(check_out)) = (parse_stay_date(&payload.check_in), parse_stay_date(&payload.check_out)) else {
        return Err(AppError::Validation("Invalid stay dates".into()));
    };

    let booking = state.reservation_service.create_booking(&hotel_id, &user_id, BookingRequest {
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        adult_count: payload.adult_count,
        child_count: payload.child_count,
        check_in,
        check_out,
    }).await?;

    Ok(Json(booking))
}

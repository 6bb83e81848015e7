use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::CancelBookingQuery;
use crate::api::dtos::responses::MessageResponse;
use crate::api::extractors::auth::AuthUser;
use std::sync::Arc;

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let hotels = state.reservation_service.list_my_bookings(&user_id).await?;
    Ok(Json(hotels))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(booking_id): Path<String>,
    Query(query): Query<CancelBookingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hotel_id = query.hotel_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(AppError::Validation("hotelId query parameter is required".into()))?;

    state.reservation_service.cancel_booking(&hotel_id, &booking_id, &user_id).await?;

    Ok(Json(MessageResponse::new("Booking cancelled successfully")))
}

use std::collections::HashMap;
use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::models::{
    booking::{Booking, NewBookingParams},
    hotel::HotelWithBookings,
};
use crate::domain::ports::{BookingRepository, HotelRepository};
use crate::error::AppError;

pub const MAX_STAY_NIGHTS: i64 = 365;

pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Create, list and cancel reservations. Every mutation is delegated to the
/// booking repository as a hotel-scoped atomic write; nothing here loads a hotel,
/// edits it in memory and saves it back.
pub struct ReservationService {
    hotel_repo: Arc<dyn HotelRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl ReservationService {
    pub fn new(hotel_repo: Arc<dyn HotelRepository>, booking_repo: Arc<dyn BookingRepository>) -> Self {
        Self { hotel_repo, booking_repo }
    }

    /// Every hotel the user holds a booking on, each carrying only that user's bookings.
    pub async fn list_my_bookings(&self, user_id: &str) -> Result<Vec<HotelWithBookings>, AppError> {
        let bookings = self.booking_repo.list_by_user(user_id).await?;
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_hotel: HashMap<String, Vec<Booking>> = HashMap::new();
        for booking in bookings.into_iter().filter(|b| b.user_id == user_id) {
            by_hotel.entry(booking.hotel_id.clone()).or_default().push(booking);
        }

        let hotels = self.hotel_repo.list_booked_by_user(user_id).await?;

        // A hotel whose bookings were cancelled between the two reads is dropped.
        Ok(hotels
            .into_iter()
            .filter_map(|hotel| {
                let bookings = by_hotel.remove(&hotel.id)?;
                Some(HotelWithBookings { hotel, bookings })
            })
            .collect())
    }

    pub async fn cancel_booking(&self, hotel_id: &str, booking_id: &str, user_id: &str) -> Result<(), AppError> {
        match self.booking_repo.cancel(hotel_id, booking_id, user_id).await {
            Ok(()) => {
                info!("Booking cancelled: {} on hotel {}", booking_id, hotel_id);
                Ok(())
            }
            Err(AppError::NotFound(msg)) => {
                warn!("Cancellation rejected for booking {} on hotel {}: {}", booking_id, hotel_id, msg);
                Err(AppError::NotFound(msg))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn create_booking(&self, hotel_id: &str, user_id: &str, request: BookingRequest) -> Result<Booking, AppError> {
        let hotel = self.hotel_repo.find_by_id(hotel_id).await?
            .ok_or(AppError::NotFound("Hotel not found".into()))?;

        if request.check_out <= request.check_in {
            return Err(AppError::Validation("Check-out must be after check-in".into()));
        }
        if (request.check_out - request.check_in).num_days() > MAX_STAY_NIGHTS {
            return Err(AppError::Validation("Stays are limited to 365 nights".into()));
        }
        if request.check_in < Utc::now().date_naive() {
            return Err(AppError::Validation("Cannot book in the past".into()));
        }
        if request.adult_count < 1 || request.child_count < 0 {
            return Err(AppError::Validation("At least one adult is required".into()));
        }
        if request.adult_count > hotel.adult_count || request.child_count > hotel.child_count {
            return Err(AppError::Validation("Guest count exceeds hotel capacity".into()));
        }

        let booking = Booking::new(NewBookingParams {
            hotel_id: hotel.id.clone(),
            user_id: user_id.to_string(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            adult_count: request.adult_count,
            child_count: request.child_count,
            check_in: request.check_in,
            check_out: request.check_out,
            price_per_night: hotel.price_per_night,
        })?;

        let created = self.booking_repo.create(&booking).await?;
        info!("Booking confirmed: {} for hotel {}", created.id, hotel.id);

        Ok(created)
    }

    /// Owner view: the hotel with every booking on it.
    pub async fn hotel_bookings(&self, owner_id: &str, hotel_id: &str) -> Result<HotelWithBookings, AppError> {
        let hotel = self.hotel_repo.find_by_owner(owner_id, hotel_id).await?
            .ok_or(AppError::NotFound("Hotel not found".into()))?;

        let bookings = self.booking_repo.list_by_hotel(&hotel.id).await?;
        Ok(HotelWithBookings { hotel, bookings })
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub hotel_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_cost: i64,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub hotel_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub price_per_night: i64,
}

impl Booking {
    /// Fails when the stay cost does not fit the ledger's integer range.
    pub fn new(params: NewBookingParams) -> Result<Self, AppError> {
        let mut booking = Self {
            id: Uuid::new_v4().to_string(),
            hotel_id: params.hotel_id,
            user_id: params.user_id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            adult_count: params.adult_count,
            child_count: params.child_count,
            check_in: params.check_in,
            check_out: params.check_out,
            total_cost: 0,
            created_at: Utc::now(),
        };

        booking.total_cost = booking.nights()
            .checked_mul(params.price_per_night)
            .ok_or(AppError::Validation("Total cost is out of range".into()))?;

        Ok(booking)
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Every mutation opens with the version bump. That statement takes the write lock
// before anything is read, so concurrent writers on a hotel queue behind each other
// (busy_timeout) instead of failing a read-to-write lock upgrade.
#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let bumped = sqlx::query("UPDATE hotels SET version = version + 1 WHERE id = ?")
            .bind(&booking.hotel_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if bumped.rows_affected() == 0 {
            return Err(AppError::NotFound("Hotel not found".into()));
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, hotel_id, user_id, first_name, last_name, email, adult_count, child_count, check_in, check_out, total_cost, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.hotel_id).bind(&booking.user_id)
            .bind(&booking.first_name).bind(&booking.last_name).bind(&booking.email)
            .bind(booking.adult_count).bind(booking.child_count)
            .bind(booking.check_in).bind(booking.check_out)
            .bind(booking.total_cost).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn list_by_hotel(&self, hotel_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE hotel_id = ? ORDER BY check_in ASC, created_at ASC").bind(hotel_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? ORDER BY check_in ASC, created_at ASC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn cancel(&self, hotel_id: &str, booking_id: &str, user_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let bumped = sqlx::query("UPDATE hotels SET version = version + 1 WHERE id = ?")
            .bind(hotel_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if bumped.rows_affected() == 0 {
            return Err(AppError::NotFound("Hotel not found".into()));
        }

        let deleted = sqlx::query("DELETE FROM bookings WHERE id = ? AND hotel_id = ? AND user_id = ?")
            .bind(booking_id).bind(hotel_id).bind(user_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}

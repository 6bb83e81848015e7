use crate::domain::{models::hotel::Hotel, ports::HotelRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresHotelRepo {
    pool: PgPool,
}

impl PostgresHotelRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for PostgresHotelRepo {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        sqlx::query_as::<_, Hotel>("INSERT INTO hotels (id, owner_id, name, city, country, description, hotel_type, adult_count, child_count, facilities, price_per_night, star_rating, image_urls, version, last_updated, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) RETURNING *")
            .bind(&hotel.id).bind(&hotel.owner_id).bind(&hotel.name).bind(&hotel.city)
            .bind(&hotel.country).bind(&hotel.description).bind(&hotel.hotel_type)
            .bind(hotel.adult_count).bind(hotel.child_count).bind(&hotel.facilities)
            .bind(hotel.price_per_night).bind(hotel.star_rating).bind(&hotel.image_urls)
            .bind(hotel.version).bind(hotel.last_updated).bind(hotel.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_owner(&self, owner_id: &str, id: &str) -> Result<Option<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE owner_id = $1 AND id = $2").bind(owner_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE owner_id = $1 ORDER BY created_at ASC").bind(owner_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY last_updated DESC, id ASC LIMIT $1 OFFSET $2").bind(limit).bind(offset).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn count(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hotels").fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_booked_by_user(&self, user_id: &str) -> Result<Vec<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("SELECT h.* FROM hotels h WHERE EXISTS (SELECT 1 FROM bookings b WHERE b.hotel_id = h.id AND b.user_id = $1) ORDER BY h.name ASC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, hotel: &Hotel, expected_version: i64) -> Result<Option<Hotel>, AppError> {
        sqlx::query_as::<_, Hotel>("UPDATE hotels SET name=$1, city=$2, country=$3, description=$4, hotel_type=$5, adult_count=$6, child_count=$7, facilities=$8, price_per_night=$9, star_rating=$10, image_urls=$11, version = version + 1, last_updated=$12 WHERE id=$13 AND owner_id=$14 AND version=$15 RETURNING *")
            .bind(&hotel.name).bind(&hotel.city).bind(&hotel.country).bind(&hotel.description)
            .bind(&hotel.hotel_type).bind(hotel.adult_count).bind(hotel.child_count).bind(&hotel.facilities)
            .bind(hotel.price_per_night).bind(hotel.star_rating).bind(&hotel.image_urls).bind(hotel.last_updated)
            .bind(&hotel.id).bind(&hotel.owner_id).bind(expected_version)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}

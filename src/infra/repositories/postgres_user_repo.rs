use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::error;

const USER_COLUMNS: &str = "id, email, first_name, last_name, password_hash, reset_token_hash, reset_token_expires_at, created_at";

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {USER_COLUMNS}"
        ))
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(&user.reset_token_hash)
            .bind(user.reset_token_expires_at)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_reset_token(&self, user_id: &str, token_hash: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET reset_token_hash = $1, reset_token_expires_at = $2 WHERE id = $3")
            .bind(token_hash)
            .bind(expires_at)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }
        Ok(())
    }

    async fn find_by_reset_token(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE reset_token_hash = $1 AND reset_token_expires_at > $2"
        ))
            .bind(token_hash)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn consume_reset_token(&self, token_hash: &str, new_password_hash: &str, now: DateTime<Utc>) -> Result<Option<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            "UPDATE users SET password_hash = $1, reset_token_hash = NULL, reset_token_expires_at = NULL
             WHERE reset_token_hash = $2 AND reset_token_expires_at > $3
             RETURNING id"
        )
            .bind(new_password_hash)
            .bind(token_hash)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres reset token redemption failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn clear_expired_reset_tokens(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE users SET reset_token_hash = NULL, reset_token_expires_at = NULL
             WHERE reset_token_hash IS NOT NULL AND reset_token_expires_at <= $1"
        )
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}

use std::sync::Arc;
use argon2::{
    password_hash::{SaltString, PasswordHash, PasswordHasher, PasswordVerifier},
    Argon2,
};
use rand::rngs::OsRng;
use tera::{Context, Tera};
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::models::{auth::{IssuedToken, TokenKind}, user::User};
use crate::domain::ports::{EmailService, UserRepository};
use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;

pub const PASSWORD_RESET_TEMPLATE: &str = "password_reset.html";
const PASSWORD_RESET_SUBJECT: &str = "Password Reset";

pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct AccountService {
    user_repo: Arc<dyn UserRepository>,
    auth_service: Arc<AuthService>,
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    config: Config,
    // Verified against when the email is unknown so both login failures cost the same.
    dummy_hash: String,
}

impl AccountService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        auth_service: Arc<AuthService>,
        email_service: Arc<dyn EmailService>,
        templates: Arc<Tera>,
        config: Config,
    ) -> Self {
        let dummy_hash = hash_password("timing-equalizer-password")
            .expect("Failed to prepare dummy password hash");

        Self { user_repo, auth_service, email_service, templates, config, dummy_hash }
    }

    pub async fn register(&self, registration: Registration) -> Result<(User, IssuedToken), AppError> {
        let email = normalize_email(&registration.email);

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let password_hash = hash_password(&registration.password)?;
        let user = User::new(email, registration.first_name, registration.last_name, password_hash);

        let created = self.user_repo.create(&user).await.map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("User already exists".into())
            } else {
                e
            }
        })?;

        let session = self.auth_service.issue(TokenKind::Session, &created.id).await?;
        info!("User registered: {}", created.id);

        Ok((created, session))
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(User, IssuedToken), AppError> {
        let email = normalize_email(email);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            let _ = verify_password(password, &self.dummy_hash);
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        let session = self.auth_service.issue(TokenKind::Session, &user.id).await?;
        info!("User logged in: {}", user.id);

        Ok((user, session))
    }

    pub async fn begin_password_recovery(&self, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email);

        let user = self.user_repo.find_by_email(&email).await?
            .ok_or(AppError::NotFound("User not found".into()))?;

        if user.has_pending_reset() {
            info!("Superseding pending reset token for user: {}", user.id);
        }

        let reset = self.auth_service.issue(TokenKind::PasswordReset, &user.id).await?;

        let mut context = Context::new();
        context.insert("first_name", &user.first_name);
        context.insert("reset_link", &format!("{}/reset-password/{}", self.config.frontend_url.trim_end_matches('/'), reset.value));

        let html_body = self.templates.render(PASSWORD_RESET_TEMPLATE, &context)
            .map_err(|e| AppError::InternalWithMsg(format!("Tera render error: {:?}", e)))?;

        self.email_service.send(&user.email, PASSWORD_RESET_SUBJECT, &html_body).await?;
        info!("Password recovery dispatched for user: {}", user.id);

        Ok(())
    }

    pub async fn complete_password_recovery(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let password_hash = hash_password(new_password)?;

        match self.auth_service.redeem_reset_token(token, &password_hash).await {
            Ok(user_id) => {
                info!("Password reset completed for user: {}", user_id);
                Ok(())
            }
            Err(AppError::InvalidToken) => {
                warn!("Rejected password reset attempt with invalid or expired token");
                Err(AppError::InvalidToken)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn profile(&self, user_id: &str) -> Result<User, AppError> {
        self.user_repo.find_by_id(user_id).await?
            .ok_or(AppError::NotFound("User not found".into()))
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal)
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest};
use validator::Validate;
use crate::api::dtos::responses::MessageResponse;
use crate::api::extractors::auth::{AuthUser, SESSION_COOKIE};
use crate::domain::models::auth::{AuthResponse, IssuedToken};
use crate::domain::services::auth_service::SESSION_TTL_HOURS;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, session) = state.account_service.authenticate(&payload.email, &payload.password).await?;
    set_session_cookie(&cookies, &session, !state.config.is_development());

    Ok(Json(AuthResponse { user_id: user.id }))
}

pub async fn validate_token(AuthUser(user_id): AuthUser) -> impl IntoResponse {
    Json(AuthResponse { user_id })
}

pub async fn logout(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());
    info!("User logged out");
    StatusCode::OK
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    state.account_service.begin_password_recovery(&payload.email).await?;

    Ok(Json(MessageResponse::new("Password reset email sent successfully")))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    state.account_service.complete_password_recovery(&token, &payload.password).await?;

    Ok(Json(MessageResponse::new("Password reset successful")))
}

pub(crate) fn set_session_cookie(cookies: &Cookies, session: &IssuedToken, secure: bool) {
    let mut cookie = Cookie::new(SESSION_COOKIE, session.value.clone());
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(Duration::hours(SESSION_TTL_HOURS));
    cookies.add(cookie);
}

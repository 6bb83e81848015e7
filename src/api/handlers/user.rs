use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::RegisterRequest;
use validator::Validate;
use crate::api::dtos::responses::MessageResponse;
use crate::api::extractors::auth::AuthUser;
use crate::api::handlers::auth::set_session_cookie;
use crate::domain::services::account_service::Registration;
use std::sync::Arc;
use tower_cookies::Cookies;

pub async fn register(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (_, session) = state.account_service.register(Registration {
        email: payload.email,
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        password: payload.password,
    }).await?;

    set_session_cookie(&cookies, &session, !state.config.is_development());

    Ok(Json(MessageResponse::new("User registered successfully")))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state.account_service.profile(&user_id).await?;
    Ok(Json(user))
}

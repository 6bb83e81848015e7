use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    routing::{get, post, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, auth, user, hotel, my_hotel, my_booking};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let frontend_origin = HeaderValue::from_str(&state.config.frontend_url)
        .expect("FRONTEND_URL must be a valid origin");

    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health_check))

        // Accounts
        .route("/api/users/register", post(user::register))
        .route("/api/users/me", get(user::me))

        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/validate-token", get(auth::validate_token))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password/{token}", post(auth::reset_password))

        // Public listings
        .route("/api/hotels", get(hotel::list_hotels))
        .route("/api/hotels/{hotel_id}", get(hotel::get_hotel))
        .route("/api/hotels/{hotel_id}/bookings", post(hotel::create_booking))

        // Owner listings
        .route("/api/my-hotels", post(my_hotel::create_hotel).get(my_hotel::list_my_hotels))
        .route("/api/my-hotels/{hotel_id}", get(my_hotel::get_my_hotel).put(my_hotel::update_my_hotel))

        // Guest reservations
        .route("/api/my-bookings", get(my_booking::list_my_bookings))
        .route("/api/my-bookings/{booking_id}", delete(my_booking::cancel_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .layer(cors)
        .with_state(state)
}

use hotel_booking_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_hotel_repo::SqliteHotelRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    domain::ports::EmailService,
    domain::services::account_service::PASSWORD_RESET_TEMPLATE,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use tera::Tera;
use tower::ServiceExt;
use serde_json::{json, Value};

#[allow(dead_code)]
#[derive(Clone, Debug)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Default)]
pub struct MockEmailService {
    pub sent: Mutex<Vec<SentEmail>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub raw_body: Vec<u8>,
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// Value of the `auth_token` cookie set by this response, if any.
    #[allow(dead_code)]
    pub fn session_cookie(&self) -> Option<String> {
        self.set_cookies.iter()
            .find(|c| c.starts_with("auth_token="))
            .map(|c| {
                let start = "auth_token=".len();
                let end = c.find(';').unwrap_or(c.len());
                c[start..end].to_string()
            })
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: Arc<MockEmailService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template(PASSWORD_RESET_TEMPLATE, "{{ reset_link }}").unwrap();
        let templates = Arc::new(tera);

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            environment: "test".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            reset_sweep_interval_secs: 300,
        };

        let mailer = Arc::new(MockEmailService::default());

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteHotelRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
            mailer.clone(),
            templates,
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mailer,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, session: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = session {
            builder = builder.header(header::COOKIE, format!("auth_token={}", token));
        }
        let request = match body {
            Some(json_body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json_body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let set_cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let raw_body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
        let body = serde_json::from_slice(&raw_body).unwrap_or(Value::Null);

        TestResponse { status, body, raw_body, set_cookies }
    }

    /// Registers a user and returns their session token.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let res = self.request("POST", "/api/users/register", None, Some(json!({
            "firstName": "Test",
            "lastName": "Guest",
            "email": email,
            "password": password
        }))).await;

        if !res.status.is_success() {
            panic!("Registration failed in test helper: status {} body {}", res.status, res.body);
        }
        res.session_cookie().expect("No auth_token cookie returned")
    }

    pub async fn user_id(&self, session: &str) -> String {
        let res = self.request("GET", "/api/auth/validate-token", Some(session), None).await;
        assert_eq!(res.status, StatusCode::OK);
        res.body["userId"].as_str().unwrap().to_string()
    }

    pub async fn create_hotel(&self, session: &str, name: &str) -> Value {
        let res = self.request("POST", "/api/my-hotels", Some(session), Some(json!({
            "name": name,
            "city": "Lisbon",
            "country": "Portugal",
            "description": "A quiet place by the river",
            "type": "Boutique",
            "adultCount": 4,
            "childCount": 2,
            "facilities": ["Wifi", "Breakfast"],
            "pricePerNight": 100,
            "starRating": 4,
            "imageUrls": ["https://assets.example.com/hotel.jpg"]
        }))).await;

        if !res.status.is_success() {
            panic!("Hotel creation failed in test helper: status {} body {}", res.status, res.body);
        }
        res.body
    }

    /// Books `nights` nights starting `days_ahead` days from today.
    pub async fn book(&self, session: &str, hotel_id: &str, days_ahead: i64, nights: i64) -> TestResponse {
        let check_in = (Utc::now() + ChronoDuration::days(days_ahead)).date_naive();
        let check_out = check_in + ChronoDuration::days(nights);

        self.request("POST", &format!("/api/hotels/{}/bookings", hotel_id), Some(session), Some(json!({
            "firstName": "Test",
            "lastName": "Guest",
            "email": "guest@example.com",
            "adultCount": 2,
            "childCount": 0,
            "checkIn": check_in.to_string(),
            "checkOut": check_out.to_string()
        }))).await
    }

    pub async fn book_ok(&self, session: &str, hotel_id: &str, days_ahead: i64) -> Value {
        let res = self.book(session, hotel_id, days_ahead, 2).await;
        if !res.status.is_success() {
            panic!("Booking failed in test helper: status {} body {}", res.status, res.body);
        }
        res.body
    }

    pub fn last_reset_token(&self) -> String {
        let sent = self.mailer.sent.lock().unwrap();
        let email = sent.last().expect("No email was sent");
        // The link may arrive HTML-escaped, so split on either form of the slash.
        email.html_body.trim().rsplit(['/', ';']).next().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

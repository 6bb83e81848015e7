use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

pub const SESSION_AUDIENCE: &str = "hotel-booking-frontend";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Self-contained signed bearer token proving the caller's identity.
    Session,
    /// Opaque single-use token whose validity lives on the account record.
    PasswordReset,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: String,
}

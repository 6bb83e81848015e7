use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, first_name: String, last_name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            first_name,
            last_name,
            password_hash,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// A recovery flow is pending while a reset digest is stored.
    pub fn has_pending_reset(&self) -> bool {
        self.reset_token_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_are_never_serialized() {
        let mut user = User::new(
            "guest@example.com".to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        );
        user.reset_token_hash = Some("deadbeef".to_string());
        user.reset_token_expires_at = Some(Utc::now());

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["email"], "guest@example.com");
        assert_eq!(json["firstName"], "Ada");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("resetTokenHash").is_none());
        assert!(json.get("resetTokenExpiresAt").is_none());
        assert!(user.has_pending_reset());
    }
}

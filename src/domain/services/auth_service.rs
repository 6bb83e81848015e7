use std::sync::Arc;
use crate::domain::{
    models::auth::{Claims, IssuedToken, TokenKind, SESSION_AUDIENCE},
    ports::UserRepository,
};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use chrono::{Utc, Duration};
use rand::{rngs::OsRng, RngCore};
use sha2::{Sha256, Digest};

pub const SESSION_TTL_HOURS: i64 = 24;
pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;
const RESET_TOKEN_BYTES: usize = 32;

/// Issues and validates both credential kinds. Session tokens are verified purely
/// from their signature; reset tokens are opaque and checked against the account store.
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, config: Config) -> Self {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .expect("Invalid JWT Private Key PEM");
        let decoding_key = DecodingKey::from_ed_pem(config.jwt_public_key.as_bytes())
            .expect("Invalid JWT Public Key PEM");

        Self { user_repo, config, encoding_key, decoding_key }
    }

    pub async fn issue(&self, kind: TokenKind, subject: &str) -> Result<IssuedToken, AppError> {
        match kind {
            TokenKind::Session => self.issue_session_token(subject),
            TokenKind::PasswordReset => {
                let value = generate_reset_token();
                let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);
                self.user_repo.set_reset_token(subject, &self.hash_token(&value), expires_at).await?;
                Ok(IssuedToken { value, expires_at })
            }
        }
    }

    /// Resolves a credential to its subject (a user id).
    pub async fn validate(&self, kind: TokenKind, credential: &str) -> Result<String, AppError> {
        match kind {
            TokenKind::Session => self.validate_session_token(credential),
            TokenKind::PasswordReset => {
                let token_hash = self.hash_token(credential);
                let user = self.user_repo.find_by_reset_token(&token_hash, Utc::now()).await?
                    .ok_or(AppError::InvalidToken)?;
                Ok(user.id)
            }
        }
    }

    /// Burns a reset token while swapping in the new password hash. The check and
    /// the write are one statement, so a token can only ever be redeemed once.
    pub async fn redeem_reset_token(&self, credential: &str, new_password_hash: &str) -> Result<String, AppError> {
        let token_hash = self.hash_token(credential);
        self.user_repo.consume_reset_token(&token_hash, new_password_hash, Utc::now()).await?
            .ok_or(AppError::InvalidToken)
    }

    pub fn issue_session_token(&self, user_id: &str) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(SESSION_TTL_HOURS);

        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: user_id.to_string(),
            aud: SESSION_AUDIENCE.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        let value = encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok(IssuedToken { value, expires_at })
    }

    pub fn validate_session_token(&self, token: &str) -> Result<String, AppError> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[SESSION_AUDIENCE]);
        validation.set_issuer(&[self.config.auth_issuer.as_str()]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Session token rejected: {}", e);
                AppError::Unauthorized
            })?;

        Ok(token_data.claims.sub)
    }

    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_tokens_are_unique_and_opaque() {
        let first = generate_reset_token();
        let second = generate_reset_token();

        assert_eq!(first.len(), RESET_TOKEN_BYTES * 2);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}

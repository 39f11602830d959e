use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Default session lifetime: 10 hours.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 36_000;

/// Mints and checks stateless session tokens.
///
/// Nothing is stored server-side, so a token cannot be revoked before `exp`.
pub struct TokenIssuer {
    handler: JwtHandler,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id`, valid from now for the configured lifetime.
    pub fn issue(&self, user_id: &str) -> Result<String, JwtError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        self.handler
            .encode(&Claims::for_user(user_id, now, self.ttl))
    }

    /// Verify signature and expiry, returning the embedded user id.
    ///
    /// # Errors
    /// * `TokenExpired` - `now >= exp`
    /// * `InvalidToken` - Signature mismatch or malformed token
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims: Claims = self.handler.decode(token)?;

        // jsonwebtoken accepts exp == now; the session contract does not
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims.user.id)
    }
}

use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Built once at startup from immutable configuration and shared read-only
/// across requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    // Digest verified against when no account matches a login
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        let password_hasher = PasswordHasher::new();
        let decoy_hash = OnceLock::new();
        if let Ok(hash) = password_hasher.hash(DECOY_PASSWORD) {
            let _ = decoy_hash.set(hash);
        }

        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(jwt_secret, token_ttl),
            decoy_hash,
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `user_id`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs one full password verification against a decoy digest so the
    /// response takes as long as a wrong password for a real account.
    ///
    /// Returns `InvalidCredentials`, or `PasswordError` if the decoy digest
    /// could not be produced.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        match self.decoy_hash() {
            Ok(decoy) => match self.password_hasher.verify(password, decoy) {
                Ok(_) => AuthenticationError::InvalidCredentials,
                Err(e) => e.into(),
            },
            Err(e) => e.into(),
        }
    }

    fn decoy_hash(&self) -> Result<&str, PasswordError> {
        if let Some(hash) = self.decoy_hash.get() {
            return Ok(hash.as_str());
        }

        let hash = self.password_hasher.hash(DECOY_PASSWORD)?;
        Ok(self.decoy_hash.get_or_init(|| hash).as_str())
    }

    /// Issue a token without password verification, e.g. right after registration.
    pub fn issue_token(&self, user_id: &str) -> Result<String, JwtError> {
        self.token_issuer.issue(user_id)
    }

    /// Verify a token and return the user id it was issued for.
    pub fn verify_token(&self, token: &str) -> Result<String, JwtError> {
        self.token_issuer.verify(token)
    }
}

//! Authentication primitives shared by the API server.
//!
//! - Password hashing (Argon2id, random salt per hash)
//! - Stateless session tokens (HS256 JWT carrying `{"user":{"id"}}`)
//! - [`Authenticator`], which ties the two together for login and registration
//!
//! # Examples
//!
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(10));
//!
//! // Register: hash password
//! let hash = auth.hash_password("secret1").unwrap();
//!
//! // Login: verify and mint a token
//! let result = auth.authenticate("secret1", &hash, "user123").unwrap();
//!
//! // Every protected request: verify the token
//! assert_eq!(auth.verify_token(&result.access_token).unwrap(), "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIssuer;
pub use jwt::DEFAULT_TOKEN_TTL_SECONDS;
pub use password::PasswordError;
pub use password::PasswordHasher;

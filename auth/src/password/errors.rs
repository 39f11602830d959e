use thiserror::Error;

/// Error type for password operations.
///
/// Messages never carry the plaintext or the stored digest.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed")]
    MalformedHash,
}

use thiserror::Error;

/// Error type for token storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Token file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token file is corrupt: {0}")]
    Corrupt(String),
}

/// Error type for API calls
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with an error status and its messages.
    #[error("Rejected with status {status}: {}", messages.join(", "))]
    Rejected { status: u16, messages: Vec<String> },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::UnexpectedResponse(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Top-level error type for session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Serialises as `{"user":{"id":"..."},"iat":...,"exp":...}`. The nested `user`
/// object is the wire contract clients and other services rely on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub user: ClaimsUser,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimsUser {
    pub id: String,
}

impl Claims {
    /// Build claims for `user_id` issued at `now` and valid for `ttl`.
    pub fn for_user(user_id: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user: ClaimsUser {
                id: user_id.to_string(),
            },
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// A token is live strictly before `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

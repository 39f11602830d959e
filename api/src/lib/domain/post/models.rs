use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::PostIdError;
use crate::domain::post::errors::TextError;
use crate::domain::user::models::AvatarUrl;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Post aggregate root.
///
/// Author name and avatar are copied at creation time, so a post keeps
/// rendering the way it was written.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    pub text: Text,
    /// Newest first, at most one per user
    pub likes: Vec<Like>,
    /// Newest first
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author: Author, text: Text) -> Self {
        Self {
            id: PostId::new(),
            author,
            text,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.likes.iter().any(|like| like.user_id == *user_id)
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == *id)
    }
}

/// Snapshot of the user who wrote a post or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub user_id: UserId,
    pub name: DisplayName,
    pub avatar: AvatarUrl,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub author: Author,
    pub text: Text,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: Author, text: Text) -> Self {
        Self {
            id: CommentId::new(),
            author,
            text,
            created_at: Utc::now(),
        }
    }
}

/// Post unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Comment identifier, stable for the lifetime of the comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(CommentId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Body of a post or comment: non-empty after trimming, bounded length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    const MAX_LENGTH: usize = 4000;

    /// # Errors
    /// * `Empty` - Blank text
    /// * `TooLong` - More than 4000 characters
    pub fn new(text: String) -> Result<Self, TextError> {
        let length = text.chars().count();
        if text.trim().is_empty() {
            Err(TextError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TextError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

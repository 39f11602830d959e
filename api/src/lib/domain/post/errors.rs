use thiserror::Error;

use crate::domain::post::models::CommentId;
use crate::domain::post::models::PostId;
use crate::domain::user::models::UserId;

/// Error type for PostId / CommentId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for post and comment text validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("Text is empty")]
    Empty,

    #[error("Text too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all post-related operations
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid text: {0}")]
    InvalidText(#[from] TextError),

    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    #[error("User {0} is not the author")]
    NotAuthor(UserId),

    #[error("Post {0} already liked")]
    AlreadyLiked(PostId),

    #[error("Post {0} has not yet been liked")]
    NotLiked(PostId),

    #[error("Author not found: {0}")]
    AuthorNotFound(UserId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("User lookup failed: {0}")]
    UserLookup(String),
}

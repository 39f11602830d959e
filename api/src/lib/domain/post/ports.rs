use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::Like;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Text;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
///
/// Every operation runs on behalf of an authenticated user.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Publish a post as `author`.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Token refers to a user that no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, author: &UserId, text: Text) -> Result<Post, PostError>;

    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn get_post(&self, id: &PostId) -> Result<Post, PostError>;

    /// Delete a post. Only its author may do so.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotAuthor` - `requester` did not write the post
    async fn delete_post(&self, id: &PostId, requester: &UserId) -> Result<(), PostError>;

    /// Like a post, returning the updated likes (newest first).
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `AlreadyLiked` - `user` already likes the post
    async fn like_post(&self, id: &PostId, user: &UserId) -> Result<Vec<Like>, PostError>;

    /// Withdraw a like, returning the updated likes.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotLiked` - `user` had not liked the post
    async fn unlike_post(&self, id: &PostId, user: &UserId) -> Result<Vec<Like>, PostError>;

    /// Comment on a post, returning the updated comments (newest first).
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `AuthorNotFound` - Commenting user no longer exists
    async fn add_comment(
        &self,
        id: &PostId,
        author: &UserId,
        text: Text,
    ) -> Result<Vec<Comment>, PostError>;

    /// Remove a comment. Only its author may do so.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `CommentNotFound` - No such comment on the post
    /// * `NotAuthor` - `requester` did not write the comment
    async fn delete_comment(
        &self,
        id: &PostId,
        comment_id: &CommentId,
        requester: &UserId,
    ) -> Result<Vec<Comment>, PostError>;
}

/// Persistence operations for the post aggregate.
///
/// Like and comment mutations are single atomic read-modify-write steps in the
/// store, keyed by user id or comment id rather than by position.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// All posts ordered by creation time, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, PostError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn delete(&self, id: &PostId) -> Result<(), PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `AlreadyLiked` - A like by the same user is already stored
    async fn add_like(&self, id: &PostId, like: Like) -> Result<Vec<Like>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotLiked` - No like by `user` is stored
    async fn remove_like(&self, id: &PostId, user: &UserId) -> Result<Vec<Like>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn add_comment(&self, id: &PostId, comment: Comment)
        -> Result<Vec<Comment>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `CommentNotFound` - No such comment on the post
    async fn remove_comment(
        &self,
        id: &PostId,
        comment_id: &CommentId,
    ) -> Result<Vec<Comment>, PostError>;
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Author;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::Like;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Text;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for posts, likes and comments.
pub struct PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    posts: Arc<PR>,
    users: Arc<UR>,
}

impl<PR, UR> PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    /// # Arguments
    /// * `posts` - Post persistence implementation
    /// * `users` - User lookup, for author name and avatar
    pub fn new(posts: Arc<PR>, users: Arc<UR>) -> Self {
        Self { posts, users }
    }

    async fn author(&self, user_id: &UserId) -> Result<Author, PostError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|e| PostError::UserLookup(e.to_string()))?
            .map(|user| Author::from(&user))
            .ok_or(PostError::AuthorNotFound(*user_id))
    }

    async fn existing(&self, id: &PostId) -> Result<Post, PostError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(*id))
    }
}

#[async_trait]
impl<PR, UR> PostServicePort for PostService<PR, UR>
where
    PR: PostRepository,
    UR: UserRepository,
{
    async fn create_post(&self, author: &UserId, text: Text) -> Result<Post, PostError> {
        let author = self.author(author).await?;
        let post = self.posts.create(Post::new(author, text)).await?;
        tracing::info!(post_id = %post.id, user_id = %post.author.user_id, "Post created");
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.posts.list_all().await
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.existing(id).await
    }

    async fn delete_post(&self, id: &PostId, requester: &UserId) -> Result<(), PostError> {
        let post = self.existing(id).await?;
        if post.author.user_id != *requester {
            return Err(PostError::NotAuthor(*requester));
        }

        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post removed");
        Ok(())
    }

    async fn like_post(&self, id: &PostId, user: &UserId) -> Result<Vec<Like>, PostError> {
        self.posts.add_like(id, Like::new(*user)).await
    }

    async fn unlike_post(&self, id: &PostId, user: &UserId) -> Result<Vec<Like>, PostError> {
        self.posts.remove_like(id, user).await
    }

    async fn add_comment(
        &self,
        id: &PostId,
        author: &UserId,
        text: Text,
    ) -> Result<Vec<Comment>, PostError> {
        let author = self.author(author).await?;
        self.posts.add_comment(id, Comment::new(author, text)).await
    }

    async fn delete_comment(
        &self,
        id: &PostId,
        comment_id: &CommentId,
        requester: &UserId,
    ) -> Result<Vec<Comment>, PostError> {
        let post = self.existing(id).await?;
        let comment = post
            .comment(comment_id)
            .ok_or(PostError::CommentNotFound(*comment_id))?;
        if comment.author.user_id != *requester {
            return Err(PostError::NotAuthor(*requester));
        }

        self.posts.remove_comment(id, comment_id).await
    }
}

//! In-process stores for local runs and tests.
//!
//! Each mutation takes the write lock for its whole read-modify-write, which
//! gives the same per-document atomicity the SQL store gets from single
//! statements.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::Like;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        self.posts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(PostError::NotFound(*id))
    }

    async fn add_like(&self, id: &PostId, like: Like) -> Result<Vec<Like>, PostError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(id).ok_or(PostError::NotFound(*id))?;
        if post.is_liked_by(&like.user_id) {
            return Err(PostError::AlreadyLiked(*id));
        }

        post.likes.insert(0, like);
        Ok(post.likes.clone())
    }

    async fn remove_like(&self, id: &PostId, user: &UserId) -> Result<Vec<Like>, PostError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(id).ok_or(PostError::NotFound(*id))?;

        let before = post.likes.len();
        post.likes.retain(|like| like.user_id != *user);
        if post.likes.len() == before {
            return Err(PostError::NotLiked(*id));
        }

        Ok(post.likes.clone())
    }

    async fn add_comment(
        &self,
        id: &PostId,
        comment: Comment,
    ) -> Result<Vec<Comment>, PostError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(id).ok_or(PostError::NotFound(*id))?;

        post.comments.insert(0, comment);
        Ok(post.comments.clone())
    }

    async fn remove_comment(
        &self,
        id: &PostId,
        comment_id: &CommentId,
    ) -> Result<Vec<Comment>, PostError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(id).ok_or(PostError::NotFound(*id))?;

        let before = post.comments.len();
        post.comments.retain(|comment| comment.id != *comment_id);
        if post.comments.len() == before {
            return Err(PostError::CommentNotFound(*comment_id));
        }

        Ok(post.comments.clone())
    }
}

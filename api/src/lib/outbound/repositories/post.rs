use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Author;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::Like;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Text;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::AvatarUrl;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::UserId;

/// Posts live in `posts`; likes and comments in child tables keyed by
/// `(post_id, user_id)` and comment id respectively, so every like/comment
/// mutation is one statement.
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn likes_for(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Like>>, PostError> {
        let rows = sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT post_id, user_id, created_at
            FROM post_likes
            WHERE post_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut likes: HashMap<Uuid, Vec<Like>> = HashMap::new();
        for r in rows {
            likes.entry(r.post_id).or_default().push(Like {
                user_id: UserId(r.user_id),
                created_at: r.created_at,
            });
        }
        Ok(likes)
    }

    async fn comments_for(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Comment>>, PostError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, text, name, avatar, created_at
            FROM post_comments
            WHERE post_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut comments: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for r in rows {
            let post_id = r.post_id;
            comments.entry(post_id).or_default().push(r.try_into()?);
        }
        Ok(comments)
    }

    /// Attach likes and comments to bare post rows, preserving row order.
    async fn hydrate(&self, rows: Vec<PostRow>) -> Result<Vec<Post>, PostError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut likes = self.likes_for(&ids).await?;
        let mut comments = self.comments_for(&ids).await?;

        rows.into_iter()
            .map(|r| {
                Ok(Post {
                    id: PostId(r.id),
                    author: author(r.user_id, r.name, r.avatar)?,
                    text: stored_text(r.text)?,
                    likes: likes.remove(&r.id).unwrap_or_default(),
                    comments: comments.remove(&r.id).unwrap_or_default(),
                    created_at: r.created_at,
                })
            })
            .collect()
    }

    async fn exists(&self, id: &PostId) -> Result<bool, PostError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn likes_of(&self, id: &PostId) -> Result<Vec<Like>, PostError> {
        Ok(self.likes_for(&[id.0]).await?.remove(&id.0).unwrap_or_default())
    }

    async fn comments_of(&self, id: &PostId) -> Result<Vec<Comment>, PostError> {
        Ok(self
            .comments_for(&[id.0])
            .await?
            .remove(&id.0)
            .unwrap_or_default())
    }
}

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    text: String,
    name: String,
    avatar: String,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct LikeRow {
    post_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    text: String,
    name: String,
    avatar: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = PostError;

    fn try_from(r: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId(r.id),
            author: author(r.user_id, r.name, r.avatar)?,
            text: stored_text(r.text)?,
            created_at: r.created_at,
        })
    }
}

fn author(user_id: Uuid, name: String, avatar: String) -> Result<Author, PostError> {
    Ok(Author {
        user_id: UserId(user_id),
        name: DisplayName::new(name)
            .map_err(|e| PostError::DatabaseError(format!("stored author name: {}", e)))?,
        avatar: AvatarUrl::from_stored(avatar),
    })
}

fn stored_text(text: String) -> Result<Text, PostError> {
    Text::new(text).map_err(|e| PostError::DatabaseError(format!("stored text: {}", e)))
}

fn database_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db_err| db_err.is_foreign_key_violation())
        .unwrap_or(false)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, text, name, avatar, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.0)
        .bind(post.author.user_id.0)
        .bind(post.text.as_str())
        .bind(post.author.name.as_str())
        .bind(post.author.avatar.as_str())
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(post)
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, text, name, avatar, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, text, name, avatar, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => Ok(self.hydrate(vec![r]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(*id));
        }

        Ok(())
    }

    async fn add_like(&self, id: &PostId, like: Like) -> Result<Vec<Like>, PostError> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(id.0)
        .bind(like.user_id.0)
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                PostError::NotFound(*id)
            } else {
                database_error(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(PostError::AlreadyLiked(*id));
        }

        self.likes_of(id).await
    }

    async fn remove_like(&self, id: &PostId, user: &UserId) -> Result<Vec<Like>, PostError> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(user.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(if self.exists(id).await? {
                PostError::NotLiked(*id)
            } else {
                PostError::NotFound(*id)
            });
        }

        self.likes_of(id).await
    }

    async fn add_comment(
        &self,
        id: &PostId,
        comment: Comment,
    ) -> Result<Vec<Comment>, PostError> {
        sqlx::query(
            r#"
            INSERT INTO post_comments (id, post_id, user_id, text, name, avatar, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comment.id.0)
        .bind(id.0)
        .bind(comment.author.user_id.0)
        .bind(comment.text.as_str())
        .bind(comment.author.name.as_str())
        .bind(comment.author.avatar.as_str())
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                PostError::NotFound(*id)
            } else {
                database_error(e)
            }
        })?;

        self.comments_of(id).await
    }

    async fn remove_comment(
        &self,
        id: &PostId,
        comment_id: &CommentId,
    ) -> Result<Vec<Comment>, PostError> {
        let result = sqlx::query("DELETE FROM post_comments WHERE id = $1 AND post_id = $2")
            .bind(comment_id.0)
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(if self.exists(id).await? {
                PostError::CommentNotFound(*comment_id)
            } else {
                PostError::NotFound(*id)
            });
        }

        self.comments_of(id).await
    }
}

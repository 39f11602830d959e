//! Post feed handlers. Every route here sits behind the token middleware.

use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use crate::domain::post::errors::PostError;
use crate::domain::post::errors::TextError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::Like;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Text;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let Json(body) = payload?;
    let text = body.try_into_text()?;

    state
        .post_service
        .create_post(&caller.user_id, text)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    state
        .post_service
        .list_posts()
        .await
        .map_err(ApiError::from)
        .map(|posts| ApiSuccess::new(StatusCode::OK, posts.iter().map(PostData::from).collect()))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state
        .post_service
        .get_post(&post_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state
        .post_service
        .delete_post(&post_id, &caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData {
                    msg: "Post removed".to_string(),
                },
            )
        })
}

pub async fn like_post(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<Vec<LikeData>>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state
        .post_service
        .like_post(&post_id, &caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|likes| ApiSuccess::new(StatusCode::OK, likes.iter().map(LikeData::from).collect()))
}

pub async fn unlike_post(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<Vec<LikeData>>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    state
        .post_service
        .unlike_post(&post_id, &caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|likes| ApiSuccess::new(StatusCode::OK, likes.iter().map(LikeData::from).collect()))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<ApiSuccess<Vec<CommentData>>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;
    let Json(body) = payload?;
    let text = body.try_into_text()?;

    state
        .post_service
        .add_comment(&post_id, &caller.user_id, text)
        .await
        .map_err(ApiError::from)
        .map(|comments| {
            ApiSuccess::new(
                StatusCode::OK,
                comments.iter().map(CommentData::from).collect(),
            )
        })
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<ApiSuccess<Vec<CommentData>>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;
    let comment_id = CommentId::from_string(&comment_id)
        .map_err(|_| ApiError::NotFound("Comment does not exist".to_string()))?;

    state
        .post_service
        .delete_comment(&post_id, &comment_id, &caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|comments| {
            ApiSuccess::new(
                StatusCode::OK,
                comments.iter().map(CommentData::from).collect(),
            )
        })
}

/// Body shared by post and comment creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    text: String,
}

impl TextRequest {
    fn try_into_text(self) -> Result<Text, ApiError> {
        Text::new(self.text).map_err(|e| {
            let msg = match e {
                TextError::Empty => "Text is required".to_string(),
                TextError::TooLong { .. } => e.to_string(),
            };
            ApiError::Validation(vec![FieldError::new("text", &msg)])
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeData {
    pub user: String,
}

impl From<&Like> for LikeData {
    fn from(like: &Like) -> Self {
        Self {
            user: like.user_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            user: comment.author.user_id.to_string(),
            text: comment.text.as_str().to_string(),
            name: comment.author.name.as_str().to_string(),
            avatar: comment.author.avatar.as_str().to_string(),
            date: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Vec<LikeData>,
    pub comments: Vec<CommentData>,
    pub date: DateTime<Utc>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            user: post.author.user_id.to_string(),
            text: post.text.as_str().to_string(),
            name: post.author.name.as_str().to_string(),
            avatar: post.author.avatar.as_str().to_string(),
            likes: post.likes.iter().map(LikeData::from).collect(),
            comments: post.comments.iter().map(CommentData::from).collect(),
            date: post.created_at,
        }
    }
}

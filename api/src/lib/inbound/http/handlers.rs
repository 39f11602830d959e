use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::post::errors::PostError;
use crate::user::errors::UserError;

pub mod current_user;
pub mod login;
pub mod posts;
pub mod register;

/// Successful response: a status code and a bare JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// One entry of a `{"errors": [...]}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(param: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: Some(param.to_string()),
        }
    }

    pub fn general(msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 with per-field messages
    Validation(Vec<FieldError>),
    /// 400 in the `errors` shape with a single generic message
    Rejected(String),
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// 500; the cause is logged and never sent to the client
    InternalServerError(String),
}

pub const SERVER_ERROR: &str = "Server Error";
pub const USER_ALREADY_EXISTS: &str = "User Already Exist";
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";
pub const NOT_AUTHORIZED: &str = "User not authorized";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::Rejected(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": [FieldError::general(&msg)] })),
            )
                .into_response(),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "msg": msg }))).into_response()
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "msg": msg }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "msg": msg }))).into_response()
            }
            ApiError::InternalServerError(cause) => {
                tracing::error!(error = %cause, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "msg": SERVER_ERROR })),
                )
                    .into_response()
            }
        }
    }
}

/// Bodies that are not JSON, or do not fit the request type, are 400s in the
/// `errors` shape like any other validation failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body");
        ApiError::Rejected(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(_) => ApiError::Rejected(USER_ALREADY_EXISTS.to_string()),
            UserError::InvalidCredentials => ApiError::Rejected(INVALID_CREDENTIALS.to_string()),
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::Credential(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound(_) | PostError::InvalidPostId(_) => {
                ApiError::NotFound("Post not found".to_string())
            }
            PostError::CommentNotFound(_) => {
                ApiError::NotFound("Comment does not exist".to_string())
            }
            PostError::NotAuthor(_) => ApiError::Unauthorized(NOT_AUTHORIZED.to_string()),
            PostError::AlreadyLiked(_) => ApiError::BadRequest("Post already liked".to_string()),
            PostError::NotLiked(_) => {
                ApiError::BadRequest("Post has not yet been liked".to_string())
            }
            PostError::AuthorNotFound(_) => ApiError::NotFound("User not found".to_string()),
            PostError::InvalidText(_) => {
                ApiError::Validation(vec![FieldError::new("text", "Text is required")])
            }
            PostError::DatabaseError(_) | PostError::UserLookup(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

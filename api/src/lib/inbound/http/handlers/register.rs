use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use crate::domain::user::errors::NameError;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::inbound::http::router::AppState;

const INVALID_EMAIL: &str = "Please Enter a valid email";
const SHORT_PASSWORD: &str = "Please enter password with 6 or more characters";

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command().map_err(ApiError::Validation)?;

    state
        .user_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

/// HTTP request body for registration (raw JSON).
///
/// Missing fields deserialize as empty strings so they surface as field errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequest {
    /// Validate every field, reporting all failures at once.
    fn try_into_command(self) -> Result<RegisterUserCommand, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = DisplayName::new(self.name)
            .map_err(|e| errors.push(FieldError::new("name", name_message(&e))))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|_| errors.push(FieldError::new("email", INVALID_EMAIL)))
            .ok();
        let password = Password::new(self.password)
            .map_err(|_| errors.push(FieldError::new("password", SHORT_PASSWORD)))
            .ok();

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => {
                Ok(RegisterUserCommand::new(name, email, password))
            }
            _ => Err(errors),
        }
    }
}

fn name_message(err: &NameError) -> &'static str {
    match err {
        NameError::Empty => "Name is required",
        NameError::TooLong { .. } => "Name must be 100 characters or fewer",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::register::TokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;
    let command = body.try_into_command().map_err(ApiError::Validation)?;

    state
        .user_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = EmailAddress::new(self.email)
            .map_err(|_| errors.push(FieldError::new("email", "Please include a valid email")))
            .ok();
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }

        match email {
            Some(email) if errors.is_empty() => Ok(LoginCommand {
                email,
                password: self.password,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_required() {
        let body: LoginRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        let errors = body.try_into_command().unwrap_err();

        assert_eq!(errors, vec![FieldError::new("password", "Password is required")]);
    }

    #[test]
    fn test_short_password_is_not_policy_checked() {
        let body = LoginRequest {
            email: "a@x.com".to_string(),
            password: "1".to_string(),
        };

        assert!(body.try_into_command().is_ok());
    }
}

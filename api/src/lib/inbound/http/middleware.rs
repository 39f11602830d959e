use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Header carrying the session token on protected requests.
pub const TOKEN_HEADER: &str = "x-auth-token";

const NO_TOKEN: &str = "No token, authorization denied";
const INVALID_TOKEN: &str = "Token is not valid";

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the session token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token_from_header(&req) {
        HeaderToken::Present(token) => token,
        HeaderToken::Missing => {
            return Err(ApiError::Unauthorized(NO_TOKEN.to_string()).into_response())
        }
        HeaderToken::Unreadable => {
            tracing::warn!("Token header is not visible ASCII");
            return Err(ApiError::Unauthorized(INVALID_TOKEN.to_string()).into_response());
        }
    };

    let user_id = state
        .authenticator
        .verify_token(token)
        .map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            ApiError::Unauthorized(INVALID_TOKEN.to_string()).into_response()
        })
        .and_then(|id| {
            UserId::from_string(&id).map_err(|e| {
                tracing::warn!("Token carries malformed user id: {}", e);
                ApiError::Unauthorized(INVALID_TOKEN.to_string()).into_response()
            })
        })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

#[derive(Debug, PartialEq, Eq)]
enum HeaderToken<'a> {
    Present(&'a str),
    /// Absent or blank
    Missing,
    /// Sent, but not visible ASCII
    Unreadable,
}

fn extract_token_from_header(req: &Request) -> HeaderToken<'_> {
    let Some(value) = req.headers().get(TOKEN_HEADER) else {
        return HeaderToken::Missing;
    };

    match value.to_str().map(str::trim) {
        Ok("") => HeaderToken::Missing,
        Ok(token) => HeaderToken::Present(token),
        Err(_) => HeaderToken::Unreadable,
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::HeaderValue;

    use super::*;

    fn request_with(value: Option<HeaderValue>) -> Request {
        let mut req = Request::new(Body::empty());
        if let Some(value) = value {
            req.headers_mut().insert(TOKEN_HEADER, value);
        }
        req
    }

    #[test]
    fn test_header_classification() {
        let req = request_with(None);
        assert_eq!(extract_token_from_header(&req), HeaderToken::Missing);

        let req = request_with(Some(HeaderValue::from_static("   ")));
        assert_eq!(extract_token_from_header(&req), HeaderToken::Missing);

        let req = request_with(Some(HeaderValue::from_static(" abc.def ")));
        assert_eq!(extract_token_from_header(&req), HeaderToken::Present("abc.def"));

        let req = request_with(Some(HeaderValue::from_bytes(b"\xfftoken").unwrap()));
        assert_eq!(extract_token_from_header(&req), HeaderToken::Unreadable);
    }
}

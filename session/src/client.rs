use chrono::DateTime;
use chrono::Utc;
use reqwest::Response;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;

use crate::errors::ClientError;

/// Header carrying the session token on protected requests.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// The authenticated user as returned by `GET /api/auth`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Thin typed client over the account routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create an account and return its first session token.
    ///
    /// # Errors
    /// * `Rejected` - Validation failed or the email is taken
    /// * `Transport` - The server could not be reached
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/api/users"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;

        Ok(success(response).await?.json::<TokenResponse>().await?.token)
    }

    /// Exchange credentials for a session token.
    ///
    /// # Errors
    /// * `Rejected` - Validation failed or the credentials are wrong
    /// * `Transport` - The server could not be reached
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Ok(success(response).await?.json::<TokenResponse>().await?.token)
    }

    /// Fetch the user the token belongs to.
    ///
    /// # Errors
    /// * `Rejected` - Token missing, invalid or expired, or the user is gone
    /// * `Transport` - The server could not be reached
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .get(self.url("/api/auth"))
            .header(TOKEN_HEADER, token)
            .send()
            .await?;

        Ok(success(response).await?.json::<UserProfile>().await?)
    }
}

/// Pass 2xx responses through; turn anything else into `Rejected`.
async fn success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Err(ClientError::Rejected {
        status: status.as_u16(),
        messages: error_messages(&body),
    })
}

/// Collect messages from either `{"msg": ..}` or `{"errors": [{"msg": ..}]}`.
fn error_messages(body: &Value) -> Vec<String> {
    if let Some(msg) = body.get("msg").and_then(Value::as_str) {
        return vec![msg.to_string()];
    }

    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

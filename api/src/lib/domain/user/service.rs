use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AvatarUrl;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration, login and identity lookup.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<String, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::Credential(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            avatar: AvatarUrl::for_email(&command.email),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        // Sign before writing so a signing failure leaves nothing behind
        let token = self
            .authenticator
            .issue_token(&user.id.to_string())
            .map_err(|e| UserError::Credential(e.to_string()))?;

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "User registered");

        Ok(token)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            // Same Argon2 cost as a wrong password, so timing does not reveal the account
            let rejection = self.authenticator.reject_unknown_account(&command.password);
            return Err(login_error(rejection));
        };

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, &user.id.to_string())
            .map_err(login_error)?;

        tracing::debug!(user_id = %user.id, "User logged in");
        Ok(result.access_token)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

fn login_error(e: AuthenticationError) -> UserError {
    match e {
        AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
        AuthenticationError::PasswordError(err) => UserError::Credential(err.to_string()),
        AuthenticationError::JwtError(err) => UserError::Credential(err.to_string()),
    }
}
